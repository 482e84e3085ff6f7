#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cluster;
pub mod command;
pub mod config;
pub mod generate;
pub mod geometry;
pub mod observability;
pub mod scene;
pub mod session;
