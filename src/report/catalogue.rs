use crate::aggregation::{Direction, Metric, MetricOp};
use crate::models::Field;
use crate::report::{ReportDefinition, RowFilter};

fn revenue() -> Metric {
    Metric::of(MetricOp::Sum, Field::Total).named("revenue")
}

fn total_transactions() -> Metric {
    Metric::of(MetricOp::CountDistinct, Field::InvoiceId).named("total_transactions")
}

fn revenue_share() -> Metric {
    Metric::of(MetricOp::Share, Field::Total).named("revenue_share_pct")
}

fn units_sold() -> Metric {
    Metric::of(MetricOp::Sum, Field::Quantity).named("units_sold")
}

fn average_rating() -> Metric {
    Metric::of(MetricOp::Avg, Field::Rating).named("avg_rating")
}

fn average_tax() -> Metric {
    Metric::of(MetricOp::Avg, Field::TaxAmount).named("avg_tax")
}

/// The dashboard's reports.
pub fn default_reports() -> Vec<ReportDefinition> {
    vec![
        ReportDefinition::new("monthly_revenue", &[Field::SalesMonth])
            .metric(revenue())
            .metric(Metric::of(MetricOp::Sum, Field::Cogs).named("cogs"))
            .metric(total_transactions()),
        ReportDefinition::new("monthly_revenue_without_outliers", &[Field::SalesMonth])
            .metric(revenue())
            .filtered(RowFilter::ExcludeOutliers),
        ReportDefinition::new("top_product_line_per_branch", &[Field::Branch, Field::ProductLine])
            .metric(revenue())
            .ranked(Field::Branch, "revenue", 1, Direction::Max),
        ReportDefinition::new("revenue_by_gender_and_payment", &[Field::Gender, Field::Payment])
            .metric(revenue())
            .metric(total_transactions())
            .metric(revenue_share()),
        ReportDefinition::new("revenue_by_city_and_branch", &[Field::City, Field::Branch])
            .metric(revenue())
            .metric(Metric::of(MetricOp::Sum, Field::TaxAmount).named("tax")),
        ReportDefinition::new("product_line_performance", &[Field::ProductLine])
            .metric(revenue())
            .metric(units_sold())
            .metric(average_rating())
            .metric(average_tax())
            .metric(revenue_share()),
        ReportDefinition::new("product_lines_above_average_units", &[Field::ProductLine])
            .metric(units_sold())
            .having_above_average("units_sold"),
        ReportDefinition::new("sales_by_weekday_and_time_of_day", &[Field::DayOfWeek, Field::TimeOfDay])
            .metric(total_transactions())
            .metric(revenue()),
        ReportDefinition::new("best_rated_weekday_per_branch", &[Field::Branch, Field::DayOfWeek])
            .metric(average_rating())
            .ranked(Field::Branch, "avg_rating", 1, Direction::Max),
        ReportDefinition::new("busiest_time_of_day_per_branch", &[Field::Branch, Field::TimeOfDay])
            .metric(total_transactions())
            .ranked(Field::Branch, "total_transactions", 1, Direction::Max),
        ReportDefinition::new("revenue_by_customer_type", &[Field::CustomerType])
            .metric(revenue())
            .metric(average_tax())
            .metric(total_transactions()),
        ReportDefinition::new("gender_distribution_per_branch", &[Field::Branch, Field::Gender])
            .metric(Metric::count().named("customers")),
        ReportDefinition::new("top_product_lines_per_city", &[Field::City, Field::ProductLine])
            .metric(units_sold())
            .ranked(Field::City, "units_sold", 3, Direction::Max),
        ReportDefinition::new("most_common_product_line_per_gender", &[Field::Gender, Field::ProductLine])
            .metric(Metric::count().named("sales"))
            .ranked(Field::Gender, "sales", 1, Direction::Max),
        ReportDefinition::new("outlier_summary", &[Field::IsOutlier])
            .metric(Metric::count().named("transactions"))
            .metric(revenue())
            .metric(revenue_share())
    ]
}
