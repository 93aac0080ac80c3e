//! `hotelsite fix`: normalize image paths in the data file.

use anyhow::Result;

use super::FixArgs;
use crate::check::fix::fix_all;
use crate::config::SiteConfig;
use crate::hotel::store;
use crate::log;
use crate::utils::plural_count;

pub fn fix_paths(config: &SiteConfig, args: &FixArgs) -> Result<()> {
    let data = &config.paths.data;
    let mut hotels = store::load(data)?;
    let report = fix_all(config, &mut hotels, args.prune);

    let mut message = format!("{} changed", plural_count(report.changed, "hotel"));
    if args.prune {
        message.push_str(&format!(", {} pruned", plural_count(report.pruned, "image")));
    }

    if args.dry {
        log!("fix"; "{} (dry run, nothing saved)", message);
    } else if report.changed > 0 {
        store::save(data, &hotels)?;
        log!("done"; "{} -> {}", message, config.root_relative(data).display());
    } else {
        log!("done"; "{}", message);
    }
    Ok(())
}
