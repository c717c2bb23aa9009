//! Properties every conversion keeps.

mod test_determinism;
mod test_round_trip;
mod test_source_spans;
mod test_trivia;
