//! Built-in topics for the city traffic sensor dataset

use deck_model::{ChartHint, ColumnSpec, ColumnType, IntentTemplate, SampleDomain, Topic};

const LOCATIONS: [&str; 10] = [
    "Downtown",
    "Highway 101",
    "Airport",
    "Harbor District",
    "University",
    "Midtown",
    "Industrial Park",
    "Riverside",
    "Old Town",
    "Tech Campus",
];

const MONTHS: [&str; 12] = [
    "2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06", "2024-07", "2024-08",
    "2024-09", "2024-10", "2024-11", "2024-12",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub(crate) fn topics() -> Vec<Topic> {
    vec![
        traffic_overview(),
        peak_traffic_hours(),
        speed_distribution(),
        geographic_analysis(),
        seasonal_trends(),
        volume_analysis(),
        congestion_patterns(),
    ]
}

fn traffic_overview() -> Topic {
    Topic::new(
        "traffic_overview",
        "Traffic Overview",
        IntentTemplate::new(
            "Give an overview of the traffic dataset {refinement}: total records, average speed and covered date range",
            "Give an overview of the traffic dataset: total records, average speed and covered date range",
        ),
        ChartHint::Summary,
    )
    .with_field(
        ColumnSpec::metric("total_records", ColumnType::Integer, SampleDomain::range(150_000.0, 160_000.0))
            .with_label("Total Records"),
    )
    .with_field(
        ColumnSpec::metric("avg_speed", ColumnType::Float, SampleDomain::range(38.0, 46.0))
            .with_label("Average Speed (mph)"),
    )
    .with_field(
        ColumnSpec::dimension("start_date", ColumnType::Text, SampleDomain::categories(["2024-01-01"]))
            .time_like(),
    )
    .with_field(
        ColumnSpec::dimension("end_date", ColumnType::Text, SampleDomain::categories(["2024-12-31"]))
            .time_like(),
    )
    .with_fallback_rows(1)
}

fn peak_traffic_hours() -> Topic {
    Topic::new(
        "peak_traffic_hours",
        "Peak Traffic Hours",
        IntentTemplate::new(
            "Count traffic readings and average speed per hour of day {refinement}",
            "Count traffic readings and average speed per hour of day",
        ),
        ChartHint::Trend,
    )
    .with_field(
        ColumnSpec::dimension("hour", ColumnType::Integer, SampleDomain::sequence(0, 1))
            .time_like(),
    )
    .with_field(
        ColumnSpec::metric("count", ColumnType::Integer, SampleDomain::range(4_000.0, 13_000.0))
            .with_label("Readings"),
    )
    .with_field(
        ColumnSpec::metric("avg_speed", ColumnType::Float, SampleDomain::range(25.0, 55.0))
            .with_label("Speed (mph)"),
    )
    .with_fallback_rows(24)
}

fn speed_distribution() -> Topic {
    Topic::new(
        "speed_distribution",
        "Speed Distribution",
        IntentTemplate::new(
            "Count vehicles per speed range {refinement}",
            "Count vehicles per speed range",
        ),
        ChartHint::Distribution,
    )
    .with_field(ColumnSpec::dimension(
        "speed_range",
        ColumnType::Text,
        SampleDomain::categories(["0-20 mph", "21-40 mph", "41-60 mph", "61+ mph"]),
    ))
    .with_field(
        ColumnSpec::metric("vehicle_count", ColumnType::Integer, SampleDomain::range(8_000.0, 60_000.0))
            .with_label("Vehicles"),
    )
    .with_fallback_rows(4)
}

fn geographic_analysis() -> Topic {
    Topic::new(
        "geographic_analysis",
        "Geographic Analysis",
        IntentTemplate::new(
            "Compare vehicle counts and average speed across sensor locations {refinement}",
            "Compare vehicle counts and average speed across sensor locations",
        ),
        ChartHint::Comparison,
    )
    .with_field(ColumnSpec::dimension(
        "location",
        ColumnType::Text,
        SampleDomain::categories(LOCATIONS),
    ))
    .with_field(
        ColumnSpec::metric("vehicle_count", ColumnType::Integer, SampleDomain::range(5_000.0, 25_000.0))
            .with_label("Vehicles"),
    )
    .with_field(
        ColumnSpec::metric("avg_speed", ColumnType::Float, SampleDomain::range(18.0, 62.0))
            .with_label("Speed (mph)"),
    )
    .with_fallback_rows(LOCATIONS.len())
}

fn seasonal_trends() -> Topic {
    Topic::new(
        "seasonal_trends",
        "Seasonal Trends",
        IntentTemplate::new(
            "Show average daily traffic volume per month {refinement}",
            "Show average daily traffic volume per month",
        ),
        ChartHint::Trend,
    )
    .with_field(
        ColumnSpec::dimension("month", ColumnType::Text, SampleDomain::categories(MONTHS)).time_like(),
    )
    .with_field(
        ColumnSpec::metric("avg_daily_volume", ColumnType::Integer, SampleDomain::range(350.0, 520.0))
            .with_label("Daily Volume"),
    )
    .with_fallback_rows(MONTHS.len())
}

fn volume_analysis() -> Topic {
    Topic::new(
        "volume_analysis",
        "Volume Analysis",
        IntentTemplate::new(
            "Total traffic volume per day of week {refinement}",
            "Total traffic volume per day of week",
        ),
        ChartHint::Comparison,
    )
    .with_field(
        ColumnSpec::dimension("day_of_week", ColumnType::Text, SampleDomain::categories(WEEKDAYS))
            .with_label("Day"),
    )
    .with_field(
        ColumnSpec::metric("total_volume", ColumnType::Integer, SampleDomain::range(14_000.0, 26_000.0))
            .with_label("Total Volume"),
    )
    .with_fallback_rows(WEEKDAYS.len())
}

fn congestion_patterns() -> Topic {
    Topic::new(
        "congestion_patterns",
        "Congestion Patterns",
        IntentTemplate::new(
            "Congestion index and average delay per traffic zone {refinement}",
            "Congestion index and average delay per traffic zone",
        ),
        ChartHint::Comparison,
    )
    .with_field(ColumnSpec::dimension(
        "zone",
        ColumnType::Text,
        SampleDomain::categories(["Zone A", "Zone B", "Zone C", "Zone D", "Zone E", "Zone F"]),
    ))
    .with_field(ColumnSpec::metric(
        "congestion_index",
        ColumnType::Float,
        SampleDomain::range(0.1, 0.95),
    ))
    .with_field(
        ColumnSpec::metric("avg_delay_minutes", ColumnType::Float, SampleDomain::range(1.5, 24.0))
            .with_label("Delay (min)"),
    )
    .with_fallback_rows(6)
}
