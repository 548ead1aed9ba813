//! # Receipt Rendering
//!
//! Turns a [`ReservationOutcome`] into text. Nothing here touches the stores.
//!
//! ## XML Layout
//! ```text
//! <reservation>
//!     <performance>
//!         <play>The CICD by Corneille</play>
//!         <date>2023-04-22</date>
//!         <time>21:00:00</time>
//!     </performance>
//!     <reservationId>123456</reservationId>
//!     <reservationStatus>FULFILLABLE</reservationStatus>   ABORTED when no seats
//!     <seats>                                               only when FULFILLABLE
//!         <seat><id>B3</id><category>STANDARD</category></seat> ...
//!     </seats>
//!     <seatCategory>STANDARD</seatCategory>
//!     <totalAmountDue>92.40€</totalAmountDue>
//! </reservation>
//! ```
//! Indentation is one tab per level and every element sits on its own line.

use std::fmt;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::service::ReservationOutcome;

const FULFILLABLE: &str = "FULFILLABLE";
const ABORTED: &str = "ABORTED";

/// Label shown for the reservation status on receipts.
pub fn status_label(outcome: &ReservationOutcome) -> &'static str {
    if outcome.is_fulfillable() {
        FULFILLABLE
    } else {
        ABORTED
    }
}

/// Renders `outcome` in `format`.
pub fn render(
    outcome: &ReservationOutcome,
    format: OutputFormat,
    currency_symbol: &str,
) -> AppResult<String> {
    match format {
        OutputFormat::Xml => Ok(render_xml(outcome, currency_symbol)),
        OutputFormat::Json => Ok(render_json(outcome, currency_symbol)?),
    }
}

// =============================================================================
// XML
// =============================================================================

pub fn render_xml(outcome: &ReservationOutcome, currency_symbol: &str) -> String {
    XmlReceipt {
        outcome,
        currency_symbol,
    }
    .to_string()
}

struct XmlReceipt<'a> {
    outcome: &'a ReservationOutcome,
    currency_symbol: &'a str,
}

impl fmt::Display for XmlReceipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        let performance = &outcome.performance;

        writeln!(f, "<reservation>")?;
        writeln!(f, "\t<performance>")?;
        writeln!(f, "\t\t<play>{}</play>", Escaped(&performance.title))?;
        writeln!(f, "\t\t<date>{}</date>", performance.start_time.format("%Y-%m-%d"))?;
        writeln!(f, "\t\t<time>{}</time>", performance.start_time.format("%H:%M:%S"))?;
        writeln!(f, "\t</performance>")?;
        writeln!(f, "\t<reservationId>{}</reservationId>", outcome.reservation_id)?;
        writeln!(f, "\t<reservationStatus>{}</reservationStatus>", status_label(outcome))?;

        if outcome.is_fulfillable() {
            writeln!(f, "\t<seats>")?;
            for seat in &outcome.seats {
                writeln!(f, "\t\t<seat>")?;
                writeln!(f, "\t\t\t<id>{}</id>", Escaped(&seat.id))?;
                writeln!(f, "\t\t\t<category>{}</category>", seat.category)?;
                writeln!(f, "\t\t</seat>")?;
            }
            writeln!(f, "\t</seats>")?;
        }

        writeln!(f, "\t<seatCategory>{}</seatCategory>", outcome.requested_category)?;
        writeln!(
            f,
            "\t<totalAmountDue>{}{}</totalAmountDue>",
            outcome.amount_due(),
            Escaped(self.currency_symbol)
        )?;
        writeln!(f, "</reservation>")
    }
}

/// Text content with `&`, `<` and `>` escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                other => fmt::Write::write_char(f, other)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Flat, display-ready view of a receipt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReceipt<'a> {
    play: &'a str,
    date: String,
    time: String,
    reservation_id: i64,
    reservation_status: &'static str,
    seats: Vec<JsonSeat<'a>>,
    seat_category: &'static str,
    total_amount_due: String,
    currency: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonSeat<'a> {
    id: &'a str,
    category: &'static str,
}

pub fn render_json(
    outcome: &ReservationOutcome,
    currency_symbol: &str,
) -> serde_json::Result<String> {
    let performance = &outcome.performance;
    let receipt = JsonReceipt {
        play: &performance.title,
        date: performance.start_time.format("%Y-%m-%d").to_string(),
        time: performance.start_time.format("%H:%M:%S").to_string(),
        reservation_id: outcome.reservation_id,
        reservation_status: status_label(outcome),
        seats: outcome
            .seats
            .iter()
            .map(|seat| JsonSeat {
                id: &seat.id,
                category: seat.category.as_str(),
            })
            .collect(),
        seat_category: outcome.requested_category.as_str(),
        total_amount_due: outcome.amount_due().to_display(),
        currency: currency_symbol,
    };

    serde_json::to_string_pretty(&receipt)
}

// =============================================================================
// Unit Tests
// =============================================================================
