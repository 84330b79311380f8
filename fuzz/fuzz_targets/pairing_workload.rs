//! See [`tabulator::test::pairing_workload`] for documentation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabulator::test::pairing_workload::Workload;

fuzz_target!(|data: Workload| {
    data.run();
});
