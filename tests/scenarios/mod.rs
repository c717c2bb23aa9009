//! End-to-end conversions of the constructs the two languages disagree on.

mod test_collisions;
mod test_compound_assignment;
mod test_default_comparison;
mod test_events;
mod test_generic_names;
mod test_stubs;
