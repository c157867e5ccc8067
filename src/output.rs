//! Terminal output: the plan table, confirmation prompt and result lines.
use std::io;

use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use yansi::Paint;

use crate::models::{Action, RescaleRequest, Server};

/// Table summarising what is about to change. `server` is `None` when the
/// pre-check was skipped.
pub fn plan_table(request: &RescaleRequest, server: Option<&Server>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }

    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Server ID".to_string(), request.server_id.to_string()]);
    if let Some(s) = server {
        table.add_row(vec!["Name".to_string(), s.name.clone()]);
        table.add_row(vec!["Status".to_string(), s.status.clone()]);
        table.add_row(vec!["Current type".to_string(), s.server_type_display()]);
    }
    table.add_row(vec!["Target type".to_string(), request.server_type.clone()]);
    table.add_row(vec![
        "Upgrade disk".to_string(),
        if request.upgrade_disk { "yes (cannot be downsized later)" } else { "no" }.to_string(),
    ]);
    table
}

pub fn print_plan(request: &RescaleRequest, server: Option<&Server>) {
    println!("\n{}\n", plan_table(request, server));
    if server.is_some_and(Server::is_running) {
        tracing::warn!(server_id = request.server_id, "Server is running");
        println!(
            "{}",
            "The server is running. Hetzner only changes the type of a powered-off server; power it off first or the request will be rejected."
                .yellow()
        );
    }
}

pub fn success_message(request: &RescaleRequest, action: &Action) -> String {
    let mut msg = format!(
        "Server {} rescaling to {} started (action {}, status {})",
        request.server_id, request.server_type, action.id, action.status
    );
    if let Some(started) = action.started {
        msg.push_str(&format!(" at {}", started.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    msg
}

pub fn print_success(request: &RescaleRequest, action: &Action) {
    println!("{}", success_message(request, action).green());
}

pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("{}", err.to_string().red());
}

/// Ask a y/n question; only `y`/`yes` (any case) counts as consent.
pub async fn confirm<R>(reader: &mut R, question: &str) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    use std::io::Write;

    print!("{} (y/n): ", question);
    io::stdout().flush()?;
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
