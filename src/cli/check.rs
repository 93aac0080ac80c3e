//! `hotelsite check`: structure and image diagnostics.
//!
//! Both checks return whether everything was found; `main` turns a `false`
//! into a non-zero exit status.

use anyhow::Result;

use super::CheckTarget;
use super::prompt::confirm;
use crate::check::{images, structure};
use crate::config::SiteConfig;
use crate::hotel::store;
use crate::log;
use crate::utils::{plural_count, plural_s};

pub fn run_check(config: &SiteConfig, target: &CheckTarget) -> Result<bool> {
    match target {
        CheckTarget::Structure { create } => check_structure(config, *create),
        CheckTarget::Images { details } => check_images(config, *details),
    }
}

fn check_structure(config: &SiteConfig, create: bool) -> Result<bool> {
    let mut report = structure::scan(config);
    report.print();
    log!("check"; "{}", report.summary());

    let missing = report.missing_dirs().count();
    if missing > 0 && (create || confirm(&format!("Create {} missing", directories(missing)))?) {
        let created = structure::create_missing_dirs(&report)?;
        log!("check"; "created {}", directories(created));
        report = structure::scan(config);
    }

    if report.is_complete() {
        log!("check"; "structure complete");
    } else {
        let missing = report.entries.iter().filter(|e| !e.exists).count();
        log!("error"; "{} missing", plural_count(missing, "manifest item"));
    }
    Ok(report.is_complete())
}

fn directories(n: usize) -> String {
    format!("{n} director{}", if n == 1 { "y" } else { "ies" })
}

fn check_images(config: &SiteConfig, details: bool) -> Result<bool> {
    let hotels = store::load(&config.paths.data)?;
    let report = images::scan(config, &hotels);
    report.print(details);

    let missing = report.missing.len();
    log!(
        "check";
        "{}: {} existing, {} missing",
        plural_count(hotels.len(), "hotel"),
        report.existing(),
        missing
    );
    if missing > 0 && !details {
        log!("check"; "run with --details to list the missing image{}", plural_s(missing));
    }
    Ok(report.is_complete())
}
