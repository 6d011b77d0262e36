//! 12306 timetable crawler.
//!
//! Fetches the station directory, the trains between two stations and,
//! optionally, each train's stops from kyfw.12306.cn, and writes them out
//! as SQL `INSERT` statements.

pub mod config;
pub mod crawl;
pub mod domain;
pub mod kyfw;
pub mod sql;
pub mod stations;
