//! Test fixtures for sadf device I/O parser testing
//!
//! This module provides sample sadf output shared by the test modules.

mod reader_tests;
mod stats_tests;

pub const RESTART_LINE: &str = "foohost;-1;2016-02-20 08:37:26 UTC;LINUX-RESTART\t(4 CPU)";

pub const HEADER_LINE: &str =
    "# hostname;interval;timestamp;DEV;tps;rd_sec/s;wr_sec/s;avgrq-sz;avgqu-sz;await;svctm;%util";

pub const DEV8_0_LINE: &str =
    "foohost;600;2016-02-20 08:55:01 UTC;dev8-0;0.35;5.88;5.17;31.73;0.00;0.36;0.34;0.01";

pub const DEV8_16_LINE: &str =
    "foohost;600;2016-02-20 08:55:01 UTC;dev8-16;0.28;2.59;4.56;25.37;0.00;4.19;4.14;0.12";

/// Helper to create a sample of real `sadf -d -- -dp` output
pub fn sample_diskio_output() -> String {
    r#"foohost;-1;2016-02-20 08:37:26 UTC;LINUX-RESTART	(4 CPU)
# hostname;interval;timestamp;DEV;tps;rd_sec/s;wr_sec/s;avgrq-sz;avgqu-sz;await;svctm;%util
foohost;600;2016-02-20 08:55:01 UTC;dev8-0;0.35;5.88;5.17;31.73;0.00;0.36;0.34;0.01
foohost;600;2016-02-20 08:55:01 UTC;dev8-16;0.28;2.59;4.56;25.37;0.00;4.19;4.14;0.12
foohost;600;2016-02-20 08:55:01 UTC;dev8-32;0.00;0.00;0.00;0.00;0.00;0.00;0.00;0.00
foohost;600;2016-02-20 09:05:01 UTC;dev8-0;0.06;1.79;0.64;38.32;0.00;0.42;0.32;0.00"#
        .to_string()
}
