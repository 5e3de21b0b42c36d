//! Translation of FLAC/Vorbis comment tags into a destination vocabulary.

use crate::converter::OutputFormat;

use super::types::TagSet;

/// Declarative tag translation rules for one destination format.
#[derive(Debug)]
pub struct TagRules {
    /// Source key → destination key renames, applied before filtering.
    pub renames: &'static [(&'static str, &'static str)],
    /// `(number, total)` pairs folded into a single `"N"` or `"N/Total"` field
    /// stored under the number key.
    pub composites: &'static [(&'static str, &'static str)],
    /// Keys kept verbatim after renaming.
    pub allowed: &'static [&'static str],
    /// Whether dropped keys are reported to the operator.
    pub report_dropped: bool,
}

/// ID3 (via the easy-key vocabulary) for MP3 output.
pub static MP3_RULES: TagRules = TagRules {
    renames: &[],
    composites: &[("tracknumber", "tracktotal"), ("discnumber", "disctotal")],
    allowed: &["album", "compilation", "title", "artist", "date", "genre"],
    report_dropped: false,
};

/// Nero metadata options for AAC output.
pub static AAC_RULES: TagRules = TagRules {
    renames: &[
        ("tracknumber", "track"),
        ("tracktotal", "totaltracks"),
        ("discnumber", "disc"),
        ("disctotal", "totaldiscs"),
        ("date", "year"),
    ],
    composites: &[],
    allowed: &[
        "title",
        "artist",
        "year",
        "album",
        "genre",
        "track",
        "totaltracks",
        "disc",
        "totaldiscs",
        "url",
        "copyright",
        "comment",
        "lyrics",
        "credits",
        "rating",
        "label",
        "composer",
        "isrc",
        "mood",
        "tempo",
    ],
    report_dropped: true,
};

impl TagRules {
    fn rename<'a>(&self, key: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| *from == key)
            .map(|(_, to)| *to)
            .unwrap_or(key)
    }

    fn is_composite_part(&self, key: &str) -> bool {
        self.composites
            .iter()
            .any(|(number, total)| *number == key || *total == key)
    }

    /// Applies the rules, returning the mapped tags and the source keys that
    /// were discarded.
    pub fn apply(&self, source: &TagSet) -> (TagSet, Vec<String>) {
        let mut mapped = TagSet::new();
        let mut dropped = Vec::new();

        for (key, value) in source.iter() {
            if self.is_composite_part(key) {
                continue;
            }
            let renamed = self.rename(key);
            if self.allowed.contains(&renamed) {
                mapped.insert(renamed, value);
            } else {
                dropped.push(key.to_string());
            }
        }

        for (number_key, total_key) in self.composites {
            if let Some(number) = source.get(number_key) {
                mapped.insert(*number_key, format_number_pair(number, source.get(total_key)));
            }
        }

        (mapped, dropped)
    }
}

/// Formats a track or disc number as `"N"` or `"N/Total"`.
///
/// An empty total counts as absent.
pub fn format_number_pair(number: &str, total: Option<&str>) -> String {
    match total {
        Some(total) if !total.is_empty() => format!("{}/{}", number, total),
        _ => number.to_string(),
    }
}

/// Maps source tags onto the tag set accepted by `format`.
///
/// For formats that report dropped fields, each discarded key is logged at
/// WARN level.
pub fn map_tags(source: &TagSet, format: OutputFormat) -> TagSet {
    let rules = format.tag_rules();
    let (mapped, dropped) = rules.apply(source);

    if rules.report_dropped {
        for key in &dropped {
            tracing::warn!(
                field = %key,
                format = %format,
                "Dropping tag not supported by {} metadata: {}",
                format,
                key
            );
        }
    }

    mapped
}
