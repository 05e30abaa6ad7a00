use anyhow::{Result, bail};

use super::super::args::SyncCommand;
use super::{CommandResult, CommandSummary, SyncSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    ProjectContext,
    sync::{FuzzyMatching, SyncOptions, synchronize},
};

pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let locales = ctx.locales(&args.locales)?;
    if locales.is_empty() {
        bail!(
            "No locales found in '{}' (use --locale or set 'locales' in {})",
            ctx.messages_dir.display(),
            CONFIG_FILE_NAME
        );
    }

    let options = SyncOptions {
        messages_root: ctx.messages_dir.clone(),
        locales,
        default_locale: ctx.config.default_locale.clone(),
        fuzzy: FuzzyMatching {
            enabled: ctx.config.fuzzy && !args.no_fuzzy,
            threshold: args.fuzzy_threshold.unwrap_or(ctx.config.fuzzy_threshold),
        },
        dry_run: args.dry_run,
    };
    options.validate()?;

    let messages = ctx.extract_messages()?;
    let report = synchronize(&messages, &options, &ctx.store())?;

    Ok(CommandResult {
        error_count: report.failed_count(),
        summary: CommandSummary::Sync(SyncSummary {
            report,
            dry_run: args.dry_run,
        }),
        source_files_checked: ctx.source_units().len(),
        unreadable_count: ctx.unreadable_files().len(),
    })
}
