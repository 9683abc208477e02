//! The bookshelf service: ISBN lookup with source fallback, CRUD over the
//! record collection, stats and CSV export.

use crate::core::isbn::{self, Isbn13};
use crate::core::stats;
use crate::domain::model::{BookMeta, BookRecord, ReadingStatus};
use crate::domain::ports::{MetadataSource, Store};
use crate::utils::error::{AppError, Result};
use chrono::NaiveDate;

const BOOKS_FILE: &str = "books.json";

/// Fields that a `book update` may change. `None` leaves the field alone.
#[derive(Debug, Default, Clone)]
pub struct BookUpdate {
    pub status: Option<ReadingStatus>,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub struct LibraryService<S: Store> {
    store: S,
    sources: Vec<Box<dyn MetadataSource>>,
    cover_endpoint: String,
}

impl<S: Store> LibraryService<S> {
    pub fn new(
        store: S,
        sources: Vec<Box<dyn MetadataSource>>,
        cover_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            store,
            sources,
            cover_endpoint: cover_endpoint.into(),
        }
    }

    /// Normalizes the ISBN and asks each metadata source in order; the first
    /// hit wins. When no source knows the book, the result carries the ISBN
    /// and cover URL with empty text fields so the caller can fill them in
    /// manually.
    pub async fn lookup(&self, raw_isbn: &str) -> Result<BookMeta> {
        let isbn = isbn::normalize(raw_isbn)?;
        let cover = self.cover_url(&isbn);

        for source in &self.sources {
            tracing::debug!("looking up {} via {}", isbn, source.name());
            if let Some(mut meta) = source.lookup(&isbn).await? {
                tracing::info!("found \"{}\" via {}", meta.title, source.name());
                // The thumbnail service covers both sources, same as the
                // original app.
                meta.cover = cover;
                return Ok(meta);
            }
        }

        tracing::warn!("no metadata found for ISBN {}", isbn);
        Ok(BookMeta {
            isbn,
            title: String::new(),
            author: String::new(),
            publisher: String::new(),
            pubdate: String::new(),
            cover,
        })
    }

    pub async fn add(&self, meta: BookMeta) -> Result<BookRecord> {
        let record = BookRecord::new(meta);
        let mut books = self.load().await?;
        books.push(record.clone());
        self.save(&books).await?;
        Ok(record)
    }

    /// Records, newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<ReadingStatus>) -> Result<Vec<BookRecord>> {
        let mut books = self.load().await?;
        if let Some(status) = status {
            books.retain(|b| b.status == status);
        }
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(books)
    }

    pub async fn update(&self, id: &str, update: BookUpdate) -> Result<BookRecord> {
        let mut books = self.load().await?;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::RecordNotFound { id: id.to_string() })?;

        if let Some(status) = update.status {
            book.status = status;
            // Moving into reading/completed stamps today's date unless one is
            // already recorded or supplied with the update.
            let today = chrono::Local::now().date_naive();
            if status == ReadingStatus::Reading
                && book.start_date.is_none()
                && update.start_date.is_none()
            {
                book.start_date = Some(today);
            }
            if status == ReadingStatus::Completed
                && book.end_date.is_none()
                && update.end_date.is_none()
            {
                book.end_date = Some(today);
            }
        }
        if let Some(rating) = update.rating {
            book.rating = rating;
        }
        if let Some(review) = update.review {
            book.review = review;
        }
        if let Some(start_date) = update.start_date {
            book.start_date = Some(start_date);
        }
        if let Some(end_date) = update.end_date {
            book.end_date = Some(end_date);
        }

        let updated = book.clone();
        self.save(&books).await?;
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut books = self.load().await?;
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return Err(AppError::RecordNotFound { id: id.to_string() });
        }
        self.save(&books).await
    }

    pub async fn monthly_stats(&self, year: i32) -> Result<[u32; 12]> {
        let books = self.load().await?;
        Ok(stats::monthly_completed(&books, year))
    }

    /// All records as CSV, newest first.
    pub async fn export_csv(&self) -> Result<String> {
        let books = self.list(None).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "isbn",
            "title",
            "author",
            "publisher",
            "pubdate",
            "status",
            "start_date",
            "end_date",
            "rating",
            "review",
        ])?;
        for book in &books {
            writer.write_record([
                book.id.clone(),
                book.isbn.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.publisher.clone(),
                book.pubdate.clone(),
                book.status.as_str().to_string(),
                book.start_date.map(|d| d.to_string()).unwrap_or_default(),
                book.end_date.map(|d| d.to_string()).unwrap_or_default(),
                book.rating.to_string(),
                book.review.clone(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::ProcessingError {
                message: format!("CSV buffer error: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| AppError::ProcessingError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })
    }

    fn cover_url(&self, isbn: &Isbn13) -> String {
        format!("{}/{}.jpg", self.cover_endpoint, isbn)
    }

    async fn load(&self) -> Result<Vec<BookRecord>> {
        match self.store.read_file(BOOKS_FILE).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            // First run: no collection file yet.
            Err(AppError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, books: &[BookRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(books)?;
        self.store.write_file(BOOKS_FILE, &data).await
    }
}
