//! Batch and project runs.

mod test_batch;
mod test_project;
