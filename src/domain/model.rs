use crate::utils::error::RoiError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Assumptions entered by the user. Every field is independent; no range or
/// sign constraints are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRecord {
    pub copies_sold: f64,
    pub book_price: f64,
    pub new_clients: f64,
    pub client_value: f64,
    pub speaking_gigs: f64,
    pub speaking_fee: f64,
    pub email_subscribers: f64,
    pub value_per_subscriber: f64,
    pub deal_size_lift_pct: f64,
    pub package_cost: f64,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            copies_sold: 500.0,
            book_price: 20.0,
            new_clients: 5.0,
            client_value: 10_000.0,
            speaking_gigs: 3.0,
            speaking_fee: 5_000.0,
            email_subscribers: 1_000.0,
            value_per_subscriber: 5.0,
            deal_size_lift_pct: 10.0,
            package_cost: 50_000.0,
        }
    }
}

impl InputRecord {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::CopiesSold => self.copies_sold,
            InputField::BookPrice => self.book_price,
            InputField::NewClients => self.new_clients,
            InputField::ClientValue => self.client_value,
            InputField::SpeakingGigs => self.speaking_gigs,
            InputField::SpeakingFee => self.speaking_fee,
            InputField::PackageCost => self.package_cost,
            InputField::EmailSubscribers => self.email_subscribers,
            InputField::ValuePerSubscriber => self.value_per_subscriber,
            InputField::DealSizeLiftPct => self.deal_size_lift_pct,
        }
    }

    /// Returns a new record with one field replaced.
    pub fn with(self, field: InputField, value: f64) -> Self {
        let mut next = self;
        match field {
            InputField::CopiesSold => next.copies_sold = value,
            InputField::BookPrice => next.book_price = value,
            InputField::NewClients => next.new_clients = value,
            InputField::ClientValue => next.client_value = value,
            InputField::SpeakingGigs => next.speaking_gigs = value,
            InputField::SpeakingFee => next.speaking_fee = value,
            InputField::PackageCost => next.package_cost = value,
            InputField::EmailSubscribers => next.email_subscribers = value,
            InputField::ValuePerSubscriber => next.value_per_subscriber = value,
            InputField::DealSizeLiftPct => next.deal_size_lift_pct = value,
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    CopiesSold,
    BookPrice,
    NewClients,
    ClientValue,
    SpeakingGigs,
    SpeakingFee,
    PackageCost,
    EmailSubscribers,
    ValuePerSubscriber,
    DealSizeLiftPct,
}

impl InputField {
    /// Display order: the basic block first, then the advanced block.
    pub const ALL: [InputField; 10] = [
        InputField::CopiesSold,
        InputField::BookPrice,
        InputField::NewClients,
        InputField::ClientValue,
        InputField::SpeakingGigs,
        InputField::SpeakingFee,
        InputField::PackageCost,
        InputField::EmailSubscribers,
        InputField::ValuePerSubscriber,
        InputField::DealSizeLiftPct,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InputField::CopiesSold => "copies_sold",
            InputField::BookPrice => "book_price",
            InputField::NewClients => "new_clients",
            InputField::ClientValue => "client_value",
            InputField::SpeakingGigs => "speaking_gigs",
            InputField::SpeakingFee => "speaking_fee",
            InputField::PackageCost => "package_cost",
            InputField::EmailSubscribers => "email_subscribers",
            InputField::ValuePerSubscriber => "value_per_subscriber",
            InputField::DealSizeLiftPct => "deal_size_lift_pct",
        }
    }

    /// Key used in the submitted payload.
    pub fn payload_key(self) -> &'static str {
        match self {
            InputField::CopiesSold => "copiesSold",
            InputField::BookPrice => "bookPrice",
            InputField::NewClients => "newClients",
            InputField::ClientValue => "clientValue",
            InputField::SpeakingGigs => "speakingGigs",
            InputField::SpeakingFee => "speakingFee",
            InputField::PackageCost => "packageCost",
            InputField::EmailSubscribers => "emailSubscribers",
            InputField::ValuePerSubscriber => "valuePerSubscriber",
            InputField::DealSizeLiftPct => "dealSizeLiftPct",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::CopiesSold => "Copies sold (forecast)",
            InputField::BookPrice => "Price per copy ($)",
            InputField::NewClients => "New clients expected",
            InputField::ClientValue => "Revenue per client ($)",
            InputField::SpeakingGigs => "Speaking gigs booked",
            InputField::SpeakingFee => "Average speaking fee ($)",
            InputField::PackageCost => "Package investment ($)",
            InputField::EmailSubscribers => "Email subscribers gained",
            InputField::ValuePerSubscriber => "Value per subscriber ($)",
            InputField::DealSizeLiftPct => "Deal-size lift (%)",
        }
    }

    pub fn is_advanced(self) -> bool {
        matches!(
            self,
            InputField::EmailSubscribers
                | InputField::ValuePerSubscriber
                | InputField::DealSizeLiftPct
        )
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InputField {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InputField::ALL
            .into_iter()
            .find(|field| field.key() == wanted || field.payload_key() == wanted)
            .ok_or_else(|| RoiError::UnknownField {
                name: wanted.to_string(),
            })
    }
}

/// Per-channel revenue the gross figure is summed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueBreakdown {
    pub books: f64,
    pub clients: f64,
    pub authority_premium: f64,
    pub speaking: f64,
    pub email: f64,
}

/// One calculation result. Gross revenue and ROI are always produced together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiProjection {
    pub breakdown: RevenueBreakdown,
    pub gross_revenue: f64,
    pub roi_percent: f64,
}

/// Inputs plus results, as forwarded to the lead-capture form.
///
/// Whole numbers are written without a fraction (`500`, not `500.0`) and
/// non-finite numbers as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(serialize_with = "whole_as_integer")]
    pub copies_sold: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub book_price: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub new_clients: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub client_value: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub speaking_gigs: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub speaking_fee: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub email_subscribers: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub value_per_subscriber: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub deal_size_lift_pct: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub package_cost: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub gross_revenue: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub roi_percent: f64,
}

// 超過這個範圍的整數交給 f64 序列化
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl SubmissionRecord {
    pub fn new(input: &InputRecord, projection: &RoiProjection) -> Self {
        Self {
            copies_sold: input.copies_sold,
            book_price: input.book_price,
            new_clients: input.new_clients,
            client_value: input.client_value,
            speaking_gigs: input.speaking_gigs,
            speaking_fee: input.speaking_fee,
            email_subscribers: input.email_subscribers,
            value_per_subscriber: input.value_per_subscriber,
            deal_size_lift_pct: input.deal_size_lift_pct,
            package_cost: input.package_cost,
            gross_revenue: projection.gross_revenue,
            roi_percent: projection.roi_percent,
        }
    }
}
