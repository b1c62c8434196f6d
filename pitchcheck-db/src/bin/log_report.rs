//! Summarize a verdict log left behind by a finished session.

use pitchcheck::db::{read_entries, DetectionHistory};
use pitchcheck::Settings;
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load();
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.log_file.clone());

    let entries = read_entries(&path)?;
    let history = DetectionHistory::replay(entries);
    let summary = history.summary(&settings.gate(), 0);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    for v in history
        .verdicts()
        .iter()
        .filter(|v| settings.gate().should_alert(v.bullshit_score))
    {
        println!("[{} {:.2}] {}", v.label, v.bullshit_score, v.claim);
    }
    Ok(())
}
