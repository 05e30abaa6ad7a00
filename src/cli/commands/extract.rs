use std::fs;

use anyhow::{Context, Result};

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::core::{ProjectContext, template::render_template};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let messages = ctx.extract_messages()?;
    let template = render_template(&messages);

    let output = if args.stdout {
        None
    } else {
        let path = args.output.clone().unwrap_or_else(|| ctx.template_path());
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &template)
            .with_context(|| format!("Failed to write template: {}", path.display()))?;
        Some(path)
    };

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            message_count: messages.len(),
            reference_count: messages.iter().map(|m| m.references.len()).sum(),
            output,
            template,
        }),
        error_count: 0,
        source_files_checked: ctx.source_units().len(),
        unreadable_count: ctx.unreadable_files().len(),
    })
}
