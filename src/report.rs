//! Plain-text rendering of an analysis for the `report` command.

use std::fmt;

use serde_json::Number;

use crate::analysis::AnalysisOutcome;

const RULE: &str = "==================================================";
const NA: &str = "N/A";

/// Console report for one outcome, written through `Display`.
pub struct Report<'a>(pub &'a AnalysisOutcome);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        writeln!(f, "\n{RULE}")?;
        writeln!(f, "Market Analysis for Zip Code: {}", outcome.zip_code())?;
        writeln!(f, "{RULE}")?;

        let analysis = match outcome {
            AnalysisOutcome::Completed(a) => a,
            AnalysisOutcome::Failed(failed) => {
                return writeln!(f, "Error analyzing {}: {}", failed.zip_code, failed.error);
            }
        };

        if let Some(sale) = &analysis.price_trends.sale_trends {
            writeln!(f, "\nSale Price Trends:")?;
            writeln!(f, "   Average Price: {}", dollars(&sale.average_price))?;
            writeln!(f, "   Median Price: {}", dollars(&sale.median_price))?;
            writeln!(f, "   Price/SqFt: {}", per_sqft(&sale.price_per_sqft.average))?;
        }

        if let Some(rental) = &analysis.price_trends.rental_trends {
            writeln!(f, "\nRental Price Trends:")?;
            writeln!(f, "   Average Rent: {}", dollars(&rental.average_rent))?;
            writeln!(f, "   Median Rent: {}", dollars(&rental.median_rent))?;
            writeln!(f, "   Rent/SqFt: {}", per_sqft(&rental.rent_per_sqft.average))?;
        }

        if let Some(dom) = &analysis.dom_trends.sale_dom {
            let avg = as_f64(&dom.average_days)
                .map(|d| format!("{d:.1} days"))
                .unwrap_or_else(|| NA.to_string());
            let listings = dom
                .total_listings
                .as_ref()
                .map(Number::to_string)
                .unwrap_or_else(|| NA.to_string());
            writeln!(f, "\nDays on Market (Sales):")?;
            writeln!(f, "   Average DOM: {avg}")?;
            writeln!(f, "   Market Velocity: {}", dom.market_velocity)?;
            writeln!(f, "   Active Listings: {listings}")?;
        }

        let insights = &analysis.market_insights;
        writeln!(f, "\nMarket Insights:")?;
        writeln!(f, "   Market Temperature: {}", insights.market_temperature)?;
        writeln!(f, "   Investment Potential: {}", insights.investment_potential)?;
        if let Some(y) = insights.rental_yield {
            writeln!(f, "   Rental Yield: {y:.2}%")?;
        }
        if !insights.recommendations.is_empty() {
            writeln!(f, "   Recommendations:")?;
            for rec in &insights.recommendations {
                writeln!(f, "     - {rec}")?;
            }
        }

        Ok(())
    }
}

fn as_f64(value: &Option<Number>) -> Option<f64> {
    value.as_ref().and_then(Number::as_f64)
}

fn dollars(value: &Option<Number>) -> String {
    as_f64(value)
        .map(|v| format!("${}", group_thousands(v)))
        .unwrap_or_else(|| NA.to_string())
}

fn per_sqft(value: &Option<Number>) -> String {
    as_f64(value)
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| NA.to_string())
}

/// `1234567.0` → `1,234,567`; fractional values keep two decimals.
fn group_thousands(value: f64) -> String {
    let formatted = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    };
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
