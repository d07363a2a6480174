// src/log.rs
// Diagnostics go to stderr and are compiled in only with the `verbose` feature.

macro_rules! warn {
    ($($arg:tt)*) => {
        if cfg!(feature = "verbose") {
            eprintln!(
                "[WARN]({}:{}) {}",
                file!(),
                line!(),
                format_args!($($arg)*)
            )
        }
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        if cfg!(feature = "verbose") {
            eprintln!(
                "[DEBUG]({}:{}) {}",
                file!(),
                line!(),
                format_args!($($arg)*)
            )
        }
    };
}
