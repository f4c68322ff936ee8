//! # Max Quantity Storefront Entry Point
//!
//! ```text
//! $ MAXQTY_LIMIT=2 maxqty-storefront
//! add 7 2
//! {"accepted":true,"inCart":2}
//! add 7
//! {"accepted":false,"inCart":2,"message":"You can add a maximum of 2 Mug's to ..."}
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    match maxqty_storefront::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("maxqty-storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
