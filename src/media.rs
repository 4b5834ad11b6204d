use web_sys::{File, HtmlAudioElement, Url};

use music_ai_core::upload::ProbedDuration;

use crate::js_bridge::FirstEvent;

const METADATA_EVENTS: &[&str] = &["loadedmetadata", "error"];

/// Ask the browser's media decoder how long `file` plays.
///
/// Anything the decoder cannot read comes back as `Unknown`; this never
/// blocks selecting the file.
pub async fn probe_duration(file: &File) -> ProbedDuration {
    match read_duration(file).await {
        Ok(secs) => ProbedDuration::from_seconds(secs),
        Err(e) => {
            log::warn!("Could not read duration of {}: {e}", file.name());
            ProbedDuration::Unknown
        }
    }
}

async fn read_duration(file: &File) -> Result<f64, String> {
    let url = Url::create_object_url_with_blob(file).map_err(|e| format!("createObjectURL: {e:?}"))?;
    let outcome = decode_metadata(&url).await;
    let _ = Url::revoke_object_url(&url);
    outcome
}

async fn decode_metadata(url: &str) -> Result<f64, String> {
    let audio = HtmlAudioElement::new().map_err(|e| format!("Audio element: {e:?}"))?;
    let settled = FirstEvent::listen(&audio, METADATA_EVENTS)?;
    audio.set_preload("metadata");
    audio.set_src(url);

    let fired = settled.wait().await?;
    let duration = audio.duration();
    let _ = audio.remove_attribute("src");

    if fired == "loadedmetadata" {
        Ok(duration)
    } else {
        Err("media decoder rejected the file".into())
    }
}
