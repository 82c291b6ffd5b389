use crate::core::pipeline::FlyoverReport;
use crate::core::PassWindow;
use crate::utils::error::{FlyoverError, Result};

const RISE_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";
pub const NO_PASSES_LINE: &str = "No upcoming passes found.";

pub fn format_pass(pass: &PassWindow) -> String {
    let rise = match pass.rise_datetime() {
        Some(datetime) => datetime.format(RISE_TIME_FORMAT).to_string(),
        None => format!("@{}", pass.rise_time),
    };
    format!("Next pass at {} for {} seconds!", rise, pass.duration)
}

pub fn format_passes(passes: &[PassWindow]) -> Vec<String> {
    passes.iter().map(format_pass).collect()
}

pub fn format_report_json(report: &FlyoverReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Lines the CLI prints on stdout for a successful run.
pub fn render_report(report: &FlyoverReport, json: bool) -> Result<Vec<String>> {
    if json {
        return Ok(vec![format_report_json(report)?]);
    }
    if report.passes.is_empty() {
        return Ok(vec![NO_PASSES_LINE.to_string()]);
    }
    Ok(format_passes(&report.passes))
}

/// The single stdout line for a failed run.
pub fn failure_line(err: &FlyoverError) -> String {
    format!("It didn't work: {}", err)
}
