//! Imsyakiyah schedule server.
//!
//! Re-serves Indonesian prayer-time schedules scraped from the Kemenag
//! Bimas Islam site as JSON, caching every scrape so the site is asked
//! at most once per state's city list and once per city and year.

pub mod cache;
pub mod config;
pub mod domain;
pub mod resolve;
pub mod upstream;
pub mod web;
