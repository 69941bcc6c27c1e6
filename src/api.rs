// src/api.rs
//
// Calls to the kiosk backend.

use crate::error::KioskError;
use crate::route::{RoutePoint, RouteResponse};
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};

const SEARCH_URL: &str = "/search";
const ROUTE_URL: &str = "/route";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    list_toko: Vec<String>,
}

fn check_status(url: &str, resp: Response) -> Result<Response, KioskError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(KioskError::Network {
            url: url.to_string(),
            reason: format!("HTTP {}", resp.status()),
        })
    }
}

/// Location names matching `query` by prefix.
pub async fn search(query: &str) -> Result<Vec<String>, KioskError> {
    let resp = Request::post(SEARCH_URL)
        .json(&SearchRequest { query })
        .map_err(|e| KioskError::network(SEARCH_URL, e))?
        .send()
        .await
        .map_err(|e| KioskError::network(SEARCH_URL, e))?;
    let body: SearchResponse = check_status(SEARCH_URL, resp)?
        .json()
        .await
        .map_err(|e| KioskError::decode(SEARCH_URL, e))?;
    Ok(body.list_toko)
}

/// Shortest route between two locations, as an ordered list of points.
pub async fn fetch_route(start: &str, goal: &str) -> Result<Vec<RoutePoint>, KioskError> {
    let resp = Request::get(ROUTE_URL)
        .query([("start", start), ("goal", goal)])
        .send()
        .await
        .map_err(|e| KioskError::network(ROUTE_URL, e))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| KioskError::network(ROUTE_URL, e))?;

    let coordinates = route_outcome(status, &body)?;
    log::info!("Route {} -> {}: {} points", start, goal, coordinates.len());
    Ok(coordinates)
}

/// Interpret a `/route` reply. The body is decoded whatever the status, so a
/// backend `error` reaches the user even when sent with a 4xx/5xx code.
pub fn route_outcome(status: u16, body: &str) -> Result<Vec<RoutePoint>, KioskError> {
    match serde_json::from_str::<RouteResponse>(body) {
        Ok(RouteResponse::Failed { error }) => Err(KioskError::Backend(error)),
        Ok(RouteResponse::Found { coordinates, route }) => {
            if !route.is_empty() {
                log::info!("Route path: {}", route.join(" -> "));
            }
            Ok(coordinates)
        }
        Err(_) if !(200..300).contains(&status) => Err(KioskError::Network {
            url: ROUTE_URL.to_string(),
            reason: format!("HTTP {}", status),
        }),
        Err(e) => Err(KioskError::decode(ROUTE_URL, e)),
    }
}
