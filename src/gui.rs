use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints, PlotUi};

use crate::app::{Action, ChartSession, Screen};
use crate::config::StockUniverse;
use crate::dataset::{self, HISTORICAL_SERIES, PREDICTED_SERIES};

// ──────────────────────────────────────────────────────────────────────────────
// Color Palette — dark financial terminal
// ──────────────────────────────────────────────────────────────────────────────

const ACCENT_BLUE: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const ACCENT_CYAN: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
const ACCENT_YELLOW: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);

const BG_DARK: egui::Color32 = egui::Color32::from_rgb(15, 15, 20);
const BG_CARD: egui::Color32 = egui::Color32::from_rgb(24, 24, 32);
const BG_ELEVATED: egui::Color32 = egui::Color32::from_rgb(32, 32, 44);
const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(51, 51, 68);

pub struct GuiApp {
    session: ChartSession,
    pending_selection: StockUniverse,
    // Set whenever the dataset changes so the plot re-applies its bounds
    // exactly once, leaving zoom and drag alone afterwards.
    bounds_dirty: bool,
}

impl GuiApp {
    pub fn new(session: ChartSession) -> Self {
        let pending_selection = session.selected;
        Self {
            session,
            pending_selection,
            bounds_dirty: false,
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.session.apply(action);
        self.bounds_dirty = true;
    }

    fn apply_theme(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals.window_rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.noninteractive.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(6.0);

        style.visuals.dark_mode = true;
        style.visuals.panel_fill = BG_DARK;
        style.visuals.window_fill = BG_CARD;
        style.visuals.faint_bg_color = BG_ELEVATED;

        style.visuals.widgets.noninteractive.bg_fill = BG_CARD;
        style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
        style.visuals.widgets.inactive.bg_fill = BG_ELEVATED;
        style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
        style.visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(45, 45, 60);
        style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
        style.visuals.widgets.active.bg_fill = ACCENT_BLUE;
        style.visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);

        style.visuals.selection.bg_fill = ACCENT_BLUE.linear_multiply(0.4);
        style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT_BLUE);

        style.spacing.item_spacing = egui::vec2(8.0, 6.0);

        ctx.set_style(style);
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        Self::apply_theme(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.session.screen {
            Screen::Selection => self.render_selection_screen(ui),
            Screen::Chart => self.render_chart_screen(ui),
        });
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Selection Screen
// ──────────────────────────────────────────────────────────────────────────────

impl GuiApp {
    fn render_selection_screen(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        ui.vertical_centered(|ui| {
            ui.add_space(available.y * 0.18);

            ui.label(
                egui::RichText::new("Stock Prediction App")
                    .size(32.0)
                    .strong()
                    .color(ACCENT_BLUE),
            );
            ui.label(
                egui::RichText::new("Historical closing prices with precomputed forecasts")
                    .size(14.0)
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(30.0);

            egui::Frame::none()
                .fill(BG_CARD)
                .rounding(egui::Rounding::same(12.0))
                .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
                .inner_margin(egui::Margin::same(24.0))
                .show(ui, |ui| {
                    ui.set_width(340.0);

                    ui.label(
                        egui::RichText::new("Select a Stock")
                            .size(14.0)
                            .color(TEXT_SECONDARY),
                    );
                    ui.add_space(8.0);

                    egui::ComboBox::from_id_salt("stock_selector")
                        .width(300.0)
                        .selected_text(self.pending_selection.label())
                        .show_ui(ui, |ui| {
                            for universe in StockUniverse::ALL {
                                ui.selectable_value(
                                    &mut self.pending_selection,
                                    universe,
                                    universe.label(),
                                );
                            }
                        });

                    ui.add_space(12.0);

                    let btn = ui.add_sized(
                        [300.0, 40.0],
                        egui::Button::new(
                            egui::RichText::new("Select Stock")
                                .size(15.0)
                                .strong()
                                .color(egui::Color32::WHITE),
                        )
                        .fill(ACCENT_BLUE)
                        .rounding(egui::Rounding::same(8.0)),
                    );
                    if btn.clicked() {
                        self.dispatch(Action::SelectStock(self.pending_selection));
                    }
                });

            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Prediction data is pre-generated; nothing is computed here.")
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Chart Screen
// ──────────────────────────────────────────────────────────────────────────────

impl GuiApp {
    fn render_chart_screen(&mut self, ui: &mut egui::Ui) {
        // ── Header Bar ──
        egui::Frame::none()
            .fill(BG_CARD)
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let back_btn = ui.add(
                        egui::Button::new(egui::RichText::new("<- Back to Selection").size(12.0))
                            .rounding(egui::Rounding::same(6.0)),
                    );
                    if back_btn.clicked() {
                        self.dispatch(Action::Back);
                    }

                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(format!("{} Stock Prices", self.session.selected))
                            .size(20.0)
                            .strong()
                            .color(ACCENT_CYAN),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let show_btn = ui.add_enabled(
                            !self.session.prediction_shown,
                            egui::Button::new(
                                egui::RichText::new("Show Prediction")
                                    .size(12.0)
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            )
                            .fill(if self.session.prediction_shown {
                                BG_ELEVATED
                            } else {
                                ACCENT_YELLOW.linear_multiply(0.8)
                            })
                            .rounding(egui::Rounding::same(6.0)),
                        );
                        if show_btn.clicked() {
                            self.dispatch(Action::ShowPrediction);
                        }
                    });
                });
            });

        ui.add_space(4.0);

        if self.session.dataset.is_empty() {
            let available = ui.available_size();
            ui.vertical_centered(|ui| {
                ui.add_space(available.y * 0.3);
                ui.label(
                    egui::RichText::new(format!(
                        "No data available for {}",
                        self.session.selected
                    ))
                    .size(14.0)
                    .color(TEXT_SECONDARY),
                );
            });
            return;
        }

        self.render_chart(ui);
    }

    fn render_chart(&mut self, ui: &mut egui::Ui) {
        let categories = self.session.dataset.categories().to_vec();
        let tooltip_categories = categories.clone();

        egui::Frame::none()
            .fill(BG_CARD)
            .rounding(egui::Rounding::same(8.0))
            .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
            .inner_margin(egui::Margin::same(8.0))
            .show(ui, |ui| {
                let plot = Plot::new("stock_chart")
                    .legend(Legend::default().position(egui_plot::Corner::LeftTop))
                    .x_axis_label("Date")
                    .y_axis_label("Close Price")
                    .x_axis_formatter(move |x, _range| {
                        category_label(&categories, x.value).unwrap_or_default()
                    })
                    .label_formatter(move |name, value| {
                        let Some(date) = category_label(&tooltip_categories, value.x) else {
                            return String::new();
                        };
                        if name.is_empty() {
                            format!("{}  {:.2}", date, value.y)
                        } else {
                            dataset::format_tooltip(name, &date, value.y)
                        }
                    })
                    .allow_drag(true)
                    .allow_zoom(true);

                plot.show(ui, |plot_ui| {
                    self.draw_series(plot_ui);
                });
            });
    }

    fn draw_series(&mut self, plot_ui: &mut PlotUi) {
        for series in self.session.dataset.series() {
            let points: PlotPoints = series
                .points
                .iter()
                .filter_map(|p| {
                    self.session
                        .dataset
                        .category_index(&p.date)
                        .map(|i| [i as f64, p.price])
                })
                .collect();

            let color = match series.name.as_str() {
                HISTORICAL_SERIES => ACCENT_CYAN,
                PREDICTED_SERIES => ACCENT_YELLOW,
                _ => ACCENT_BLUE,
            };

            plot_ui.line(Line::new(points).name(&series.name).color(color).width(1.8));
        }

        if self.bounds_dirty {
            self.bounds_dirty = false;
            if let Some(axis) = self.session.axis {
                let n = self.session.dataset.categories().len();
                // A flat dataset collapses to a zero-height range; give the
                // viewport a little room so the line is still visible.
                let (y_min, y_max) = if axis.min == axis.max {
                    (axis.min - 1.0, axis.max + 1.0)
                } else {
                    (axis.min, axis.max)
                };
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [-0.5, y_min],
                    [(n.max(1) - 1) as f64 + 0.5, y_max],
                ));
            }
        }
    }
}

/// Maps a plot x coordinate back to its category (date) label. Off-grid
/// coordinates between categories resolve to the nearest one.
fn category_label(categories: &[String], x: f64) -> Option<String> {
    if categories.is_empty() {
        return None;
    }
    let idx = x.round();
    if idx < 0.0 || idx >= categories.len() as f64 {
        return None;
    }
    categories.get(idx as usize).cloned()
}
