use crate::domain::model::{InputRecord, RevenueBreakdown, RoiProjection};

/// Share of the cover price the author keeps on each copy sold.
pub const BOOK_MARGIN: f64 = 0.5;

/// Computes the revenue/ROI projection for one set of assumptions.
///
/// Pure and infallible. A zero `package_cost` yields a non-finite
/// `roi_percent`, which is returned as-is.
pub fn project(input: &InputRecord) -> RoiProjection {
    let books = input.copies_sold * input.book_price * BOOK_MARGIN;
    let clients = input.new_clients * input.client_value;
    // 權威溢價是套在客戶收入上的百分比，不是獨立的收入來源
    let authority_premium = (input.deal_size_lift_pct / 100.0) * clients;
    let speaking = input.speaking_gigs * input.speaking_fee;
    let email = input.email_subscribers * input.value_per_subscriber;

    let gross_revenue = books + clients + authority_premium + speaking + email;
    let roi_percent = ((gross_revenue - input.package_cost) / input.package_cost) * 100.0;

    RoiProjection {
        breakdown: RevenueBreakdown {
            books,
            clients,
            authority_premium,
            speaking,
            email,
        },
        gross_revenue,
        roi_percent,
    }
}
