//! Figure templates per chart style

use deck_model::ChartStyle;

pub(crate) struct Theme {
    /// Named template of the interactive figure backend
    pub(crate) figure_template: &'static str,
    pub(crate) palette: &'static [&'static str],
    pub(crate) grid: bool,
    pub(crate) title_color: &'static str,
}

const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
];

const CLASSIC: &[&str] = &[
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
];

const MONO: &[&str] = &["#4a5568", "#718096", "#a0aec0", "#cbd5e0"];

pub(crate) fn theme(style: ChartStyle) -> Theme {
    match style {
        ChartStyle::Modern => Theme {
            figure_template: "plotly_white",
            palette: SET3,
            grid: true,
            title_color: "#2d3748",
        },
        ChartStyle::Classic => Theme {
            figure_template: "plotly",
            palette: CLASSIC,
            grid: true,
            title_color: "#000000",
        },
        ChartStyle::Minimal => Theme {
            figure_template: "simple_white",
            palette: MONO,
            grid: false,
            title_color: "#4a5568",
        },
    }
}
