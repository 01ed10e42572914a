use serde::Serialize;
use std::str::FromStr;
use tracing::warn;

use crate::models::{CorrectAction, TransactionKind};
use crate::sgml::RawElement;

/// One `<STMTTRN>` element as found in the document, before any decoding.
///
/// Every field is optional here: presence of the required ones is checked when the record
/// is mapped, so that the import can decide whether to skip it or fail the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawTransaction {
    #[serde(rename = "TRNTYPE")]
    pub kind: Option<TransactionKind>,
    #[serde(rename = "DTPOSTED")]
    pub date_posted: Option<String>,
    #[serde(rename = "TRNAMT")]
    pub amount: Option<String>,
    #[serde(rename = "FITID")]
    pub fitid: Option<String>,
    #[serde(rename = "MEMO")]
    pub memo: Option<String>,
    #[serde(rename = "NAME")]
    pub name: Option<String>,
    #[serde(rename = "CHECKNUM")]
    pub check_number: Option<String>,
    #[serde(rename = "CORRECTACTION")]
    pub correct_action: Option<CorrectAction>,
    #[serde(rename = "CORRECTFITID")]
    pub correct_fitid: Option<String>,
    /// `CURSYM` of the `CURRENCY` (or `ORIGCURRENCY`) aggregate.
    #[serde(rename = "CURRENCY")]
    pub currency: Option<String>,
    #[serde(rename = "PAYEEID")]
    pub payee_id: Option<String>,
    #[serde(rename = "REFNUM")]
    pub reference_number: Option<String>,
    #[serde(rename = "SIC")]
    pub sic: Option<String>,
    #[serde(rename = "SRVRTID")]
    pub server_transaction_id: Option<String>,
    #[serde(rename = "DTAVAIL")]
    pub date_available: Option<String>,
    #[serde(rename = "DTUSER")]
    pub date_user: Option<String>,
    /// Line of the `<STMTTRN>` start tag.
    #[serde(skip)]
    pub line: usize
}

impl RawTransaction {
    pub fn from_element(element: &RawElement) -> Self {
        let text = |name: &str| element.value(name).map(str::to_string);

        let correct_action = element.value("CORRECTACTION").and_then(|value| {
            CorrectAction::from_str(value)
                .inspect_err(|error| warn!("{error} on transaction at line {}", element.line))
                .ok()
        });

        //NOTE: Payee details may come as a PAYEE aggregate instead of the NAME element
        let name = text("NAME").or_else(|| element.child("PAYEE").and_then(|payee| payee.value("NAME")).map(str::to_string));

        let currency = ["CURRENCY", "ORIGCURRENCY"].iter()
            .filter_map(|aggregate| element.child(aggregate))
            .find_map(|aggregate| aggregate.value("CURSYM").or(aggregate.text.as_deref()))
            .map(str::to_string);

        Self {
            kind: element.value("TRNTYPE").and_then(|value| TransactionKind::from_str(value).ok()),
            date_posted: text("DTPOSTED"),
            amount: text("TRNAMT"),
            fitid: text("FITID"),
            memo: text("MEMO"),
            name,
            check_number: text("CHECKNUM"),
            correct_action,
            correct_fitid: text("CORRECTFITID"),
            currency,
            payee_id: text("PAYEEID"),
            reference_number: text("REFNUM"),
            sic: text("SIC"),
            server_transaction_id: text("SRVRTID"),
            date_available: text("DTAVAIL"),
            date_user: text("DTUSER"),
            line: element.line
        }
    }

    /// Identifier used in diagnostics when the record itself may lack one.
    pub fn label(&self) -> &str {
        self.fitid.as_deref().filter(|fitid| !fitid.is_empty()).unwrap_or("no FITID")
    }
}
