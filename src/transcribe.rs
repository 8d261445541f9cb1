use std::path::Path;

use anyhow::{anyhow, Result};
use log::info;

use crate::file_handlers;
use crate::providers::openai::{OpenAi, TranscriptionSegment};

// @module: Hosted transcription and segment table output

/// Transcribe an episode and write the timestamped segment table.
///
/// Segments land as tab-separated `id/start/end/text` rows, matching the
/// layout the editing notes expect.
pub async fn transcribe_to_table(
    client: &OpenAi,
    audio_path: &Path,
    model: &str,
    language: &str,
    output: &Path,
) -> Result<()> {
    if !audio_path.is_file() {
        return Err(anyhow!("Audio file not found: {}", audio_path.display()));
    }

    let response = client.transcribe(audio_path, model, language).await?;
    info!(
        "Transcribed {} ({} segments)",
        audio_path.display(),
        response.segments.len()
    );

    file_handlers::write_text(output, &segments_to_table(&response.segments))?;
    info!("Wrote transcript table to {}", output.display());
    Ok(())
}

fn segments_to_table(segments: &[TranscriptionSegment]) -> String {
    let mut out = String::from("id\tstart\tend\ttext\n");
    for segment in segments {
        out.push_str(&format!(
            "{}\t{:.2}\t{:.2}\t{}\n",
            segment.id,
            segment.start,
            segment.end,
            segment.text.trim()
        ));
    }
    out
}
