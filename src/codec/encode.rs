use crate::model::{FailedSource, SourceSnapshot, TitleRecord};

use super::{FAILURE_SECTION_MARKER, ID_TAG_OPEN, MOBILE_TAG_OPEN, UNRANKED_LINE_RANK, URL_TAG_OPEN};

/// Encode one fetch cycle into the flat-text snapshot grammar (see mod.rs).
pub fn encode(snapshots: &[SourceSnapshot], failures: &[FailedSource]) -> String {
    let mut out = String::new();

    for snap in snapshots {
        out.push_str(&snap.alias);
        push_id_tag(&mut out, &snap.source_id);
        out.push('\n');

        let mut rows: Vec<&TitleRecord> = snap.titles.iter().collect();
        // Stable sort: equal min ranks keep discovery order.
        rows.sort_by_key(|r| r.min_rank().unwrap_or(u32::MAX));

        for rec in rows {
            out.push_str(&format!(
                "{}. {}",
                rec.min_rank().unwrap_or(UNRANKED_LINE_RANK),
                rec.title
            ));
            if let Some(url) = rec.url.as_deref().filter(|s| !s.is_empty()) {
                out.push_str(URL_TAG_OPEN);
                out.push_str(url);
                out.push(']');
            }
            if let Some(mobile) = rec.mobile_url.as_deref().filter(|s| !s.is_empty()) {
                out.push_str(MOBILE_TAG_OPEN);
                out.push_str(mobile);
                out.push(']');
            }
            out.push('\n');
        }

        out.push('\n');
    }

    if !failures.is_empty() {
        out.push_str(FAILURE_SECTION_MARKER);
        out.push('\n');
        for f in failures {
            out.push_str(&f.alias);
            push_id_tag(&mut out, &f.source_id);
            out.push('\n');
        }
    }

    out
}

fn push_id_tag(out: &mut String, source_id: &str) {
    out.push_str(ID_TAG_OPEN);
    out.push_str(source_id);
    out.push(')');
}
