//! Cross-module scenario tests

mod reconcile_scenario_tests;
mod tracker_flow_tests;
