#[path = "helpers/mod.rs"]
mod helpers;

#[path = "scenarios/mod.rs"]
mod scenarios;

#[path = "properties/mod.rs"]
mod properties;

#[path = "batch/mod.rs"]
mod batch;
