//! Serverless geocoding proxy. Forwards a free-text address to Nominatim so
//! browser clients are not blocked by cross-origin restrictions.

#[cfg(feature = "lambda")]
use kiroku::adapters::NominatimClient;
#[cfg(feature = "lambda")]
use kiroku::config::lambda::LambdaConfig;
#[cfg(feature = "lambda")]
use kiroku::utils::logger;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub address: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(untagged)]
pub enum Response {
    Found {
        lat: f64,
        lon: f64,
        display_name: String,
    },
    NotFound {
        error: String,
    },
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let Some(address) = event.payload.address.filter(|a| !a.trim().is_empty()) else {
        return Err("address parameter is required".into());
    };

    let config =
        LambdaConfig::from_env().map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let client = NominatimClient::new(
        config.geocode_endpoint,
        config.user_agent,
        config.region_hint,
    );

    tracing::info!("geocoding address: {}", address);
    let hit = client
        .search(&address)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    match hit {
        Some(hit) => {
            tracing::info!(
                "resolved to ({}, {}): {}",
                hit.point.lat,
                hit.point.lon,
                hit.display_name
            );
            Ok(Response::Found {
                lat: hit.point.lat,
                lon: hit.point.lon,
                display_name: hit.display_name,
            })
        }
        None => {
            tracing::warn!("no coordinates found");
            Ok(Response::NotFound {
                error: "No coordinates found".to_string(),
            })
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
