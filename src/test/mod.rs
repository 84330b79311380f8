//! Whole-tournament tests, plus the workload driven by the fuzzer.

pub mod pairing_workload;
