// codec — flat-text snapshot grammar (encode + decode).
//
// File layout (one file per fetch cycle):
//
//   <alias> (ID: <source_id>)            <- section header, one per source
//   <minRank>. <title>[ [URL:<url>]][ [MOBILE:<mobileUrl>]]
//   ...
//   <blank line>                         <- section separator
//   ==== 以下ID请求失败 ====              <- failure section, only if non-empty
//   <alias> (ID: <source_id>)
//
// Title lines are sorted ascending by the record's minimum rank; ties keep
// discovery order. The URL tag is emitted only for a non-empty url, MOBILE
// only for a non-empty mobile url, and MOBILE always follows URL.
//
// Decode policy:
// - a section whose first line contains the failure marker is skipped;
// - a section with fewer than 2 non-empty lines is skipped;
// - title lines are parsed right-to-left (MOBILE tag, then URL tag, then the
//   digit rank prefix; a non-digit prefix means the whole line is the title
//   with an implicit rank of 1);
// - a line that fails to parse is logged, counted and skipped; the rest of
//   the section still decodes.
//
// Decode is lossy by design: multiple ranks collapse to the minimum recorded
// by encode, and titles containing the literal tag syntax are not escaped.

mod decode;
mod encode;

pub use decode::{decode, DecodedSection, DecodedSnapshot, LineDiagnostic, ParsedTitle};
pub use encode::encode;

/// Marker line opening the failure section of a snapshot file.
pub const FAILURE_SECTION_MARKER: &str = "==== 以下ID请求失败 ====";

pub(crate) const URL_TAG_OPEN: &str = " [URL:";
pub(crate) const MOBILE_TAG_OPEN: &str = " [MOBILE:";
pub(crate) const ID_TAG_OPEN: &str = " (ID: ";

/// Rank written for a record that somehow carries no observed rank. A wire
/// fallback only; engine state models "unranked" as an empty rank list.
pub(crate) const UNRANKED_LINE_RANK: u32 = 99;
