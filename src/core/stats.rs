//! Reading statistics: completed books bucketed by month.

use crate::domain::model::{BookRecord, ReadingStatus};
use chrono::Datelike;

/// Count of completed books per month of `year`, indexed January = 0.
/// Only records with status completed and an end date inside the year count.
pub fn monthly_completed(books: &[BookRecord], year: i32) -> [u32; 12] {
    let mut counts = [0u32; 12];
    for book in books {
        if book.status != ReadingStatus::Completed {
            continue;
        }
        let Some(end) = book.end_date else { continue };
        if end.year() == year {
            counts[end.month0() as usize] += 1;
        }
    }
    counts
}

pub fn yearly_total(counts: &[u32; 12]) -> u32 {
    counts.iter().sum()
}
