//! Video format selection.

use crate::media::VideoFormat;

/// Quality preference for video downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Quality {
    /// Highest resolution available.
    Best,
    /// Lowest resolution available.
    Worst,
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Best => f.write_str("best"),
            Quality::Worst => f.write_str("worst"),
        }
    }
}

/// Picks one format from the list according to the quality preference.
///
/// Formats carrying audio are preferred: when any exist, audio-less
/// variants are excluded from consideration. `best` maximizes pixel area
/// with height as the tiebreak; `worst` minimizes height then width,
/// treating missing dimensions as unbounded so dimensioned entries win.
pub fn select_format(formats: &[VideoFormat], quality: Quality) -> Option<&VideoFormat> {
    if formats.is_empty() {
        return None;
    }

    let with_audio: Vec<&VideoFormat> = formats.iter().filter(|f| f.has_audio).collect();
    let pool: Vec<&VideoFormat> = if with_audio.is_empty() {
        formats.iter().collect()
    } else {
        with_audio
    };

    match quality {
        Quality::Best => pool.into_iter().max_by_key(|f| {
            let width = u64::from(f.width.unwrap_or(0));
            let height = u64::from(f.height.unwrap_or(0));
            (height * width, height)
        }),
        Quality::Worst => pool.into_iter().min_by_key(|f| {
            (
                f.height.unwrap_or(u32::MAX),
                f.width.unwrap_or(u32::MAX),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn format(id: &str, width: u32, height: u32, has_audio: bool) -> VideoFormat {
        VideoFormat {
            url: format!("https://cdn/{}.mp4", id),
            width: Some(width),
            height: Some(height),
            format_id: id.to_string(),
            has_audio,
        }
    }

    #[test]
    fn test_select_prefers_audio_formats() {
        let formats = vec![
            format("720p", 720, 1280, true),
            format("1080p", 1080, 1920, true),
            format("480p-mute", 480, 854, false),
        ];

        let best = select_format(&formats, Quality::Best).expect("best");
        assert_eq!(best.format_id, "1080p");

        // The audio-less 480p entry is excluded, so "worst" is the 720p one.
        let worst = select_format(&formats, Quality::Worst).expect("worst");
        assert_eq!(worst.format_id, "720p");
    }

    #[test]
    fn test_select_falls_back_without_audio() {
        let formats = vec![format("480p-mute", 480, 854, false)];
        let best = select_format(&formats, Quality::Best).expect("best");
        assert_eq!(best.format_id, "480p-mute");
        let worst = select_format(&formats, Quality::Worst).expect("worst");
        assert_eq!(worst.format_id, "480p-mute");
    }

    #[test]
    fn test_select_missing_dimensions() {
        let mut no_dims = format("mystery", 0, 0, true);
        no_dims.width = None;
        no_dims.height = None;
        let formats = vec![no_dims, format("360p", 360, 640, true)];

        // Missing dimensions rank as zero area for best, unbounded for worst.
        let best = select_format(&formats, Quality::Best).expect("best");
        assert_eq!(best.format_id, "360p");
        let worst = select_format(&formats, Quality::Worst).expect("worst");
        assert_eq!(worst.format_id, "360p");
    }

    #[test]
    fn test_select_empty_input() {
        assert!(select_format(&[], Quality::Best).is_none());
        assert!(select_format(&[], Quality::Worst).is_none());
    }
}
