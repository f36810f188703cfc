mod aggregate_tests;
mod parse_tests;
