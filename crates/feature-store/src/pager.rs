//! Offset/limit pagination over a matched record set.

use features_protocol::Record;

/// A page of records plus the counts the response envelope reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The records on this page.
    pub records: Vec<Record>,

    /// Count after truncation.
    pub number_returned: usize,

    /// Count before pagination.
    pub number_matched: usize,
}

/// Slice a matched record set by offset and limit.
///
/// The offset is clamped to the matched count and the limit to the records
/// remaining past the offset. `None` for the limit returns everything past
/// the offset.
pub fn paginate(records: Vec<Record>, limit: Option<usize>, offset: usize) -> Page {
    let number_matched = records.len();
    let offset = offset.min(number_matched);
    let records: Vec<Record> = match limit {
        Some(limit) => {
            let limit = limit.min(number_matched - offset);
            records.into_iter().skip(offset).take(limit).collect()
        }
        None => records.into_iter().skip(offset).collect(),
    };

    Page {
        number_returned: records.len(),
        number_matched,
        records,
    }
}

/// Whether a next page should be advertised for these paging inputs.
pub fn has_next_page(limit: i64, offset: i64, matched: usize) -> bool {
    limit + offset <= matched as i64
}

/// Whether a previous page should be advertised for these paging inputs.
pub fn has_prev_page(limit: i64, offset: i64) -> bool {
    offset - limit >= 0
}
