use chrono::{Duration, Local, NaiveDate};
use egui::{Color32, RichText};

use super::toast::ToastManager;
use super::views::availability_grid::{render_availability_grid, GridPointerEvent};
use super::views::category_bar::render_category_bar;
use crate::models::category::Category;
use crate::models::settings::GridSettings;
use crate::services::auth::AuthProvider;
use crate::services::availability::{
    AvailabilityBoard, AvailabilityError, ReconcileOutcome, ReconcileWorker, SqliteStore,
};
use crate::services::category::CategoryService;
use crate::services::database::Database;
use crate::services::settings::SettingsService;

const IN_MEMORY: &str = ":memory:";

/// Weekly availability editor window.
pub struct AvailabilityApp {
    database: Database,
    board: AvailabilityBoard,
    /// Catalog shown in the category bar
    categories: Vec<Category>,
    /// Background saver; `None` saves on the UI thread
    worker: Option<ReconcileWorker>,
    toasts: ToastManager,
}

impl eframe::App for AvailabilityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_outcomes();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.board.gesture().is_some() {
            self.board.cancel_gesture();
        }

        self.render_top_panel(ctx);
        self.render_status_bar(ctx);
        self.render_grid(ctx);
        self.toasts.render(ctx);

        if self.worker.as_ref().is_some_and(|w| w.in_flight() > 0) {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}

impl AvailabilityApp {
    /// Build the app over an initialised database and load the current week.
    pub fn new(database: Database, auth: Box<dyn AuthProvider>, today: NaiveDate) -> Self {
        let settings = load_settings_or_default(&database);
        let categories = load_categories(&database);
        let worker = start_worker(&database);

        let mut app = Self {
            board: AvailabilityBoard::new(auth, settings, today),
            database,
            categories,
            worker,
            toasts: ToastManager::new(),
        };

        let store = SqliteStore::new(app.database.connection());
        if let Err(e) = app.board.refresh(&store) {
            report(&mut app.toasts, &e);
        }
        app
    }

    fn collect_outcomes(&mut self) {
        let Some(worker) = self.worker.as_mut() else {
            return;
        };
        for outcome in worker.drain() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: ReconcileOutcome) {
        match self.board.apply_outcome(outcome) {
            Ok(0) => {}
            Ok(count) => self.toasts.success(format!(
                "Saved {} slot{}",
                count,
                if count == 1 { "" } else { "s" }
            )),
            Err(e) => report(&mut self.toasts, &e),
        }
    }

    fn finish_drag(&mut self) {
        match self.board.finish_gesture() {
            Ok(Some(job)) => match self.worker.as_mut() {
                Some(worker) => worker.submit(job),
                None => {
                    let outcome = job.run(&SqliteStore::new(self.database.connection()));
                    self.apply_outcome(outcome);
                }
            },
            Ok(None) => {}
            Err(e) => report(&mut self.toasts, &e),
        }
    }

    fn navigate(&mut self, target: NaiveDate) {
        let store = SqliteStore::new(self.database.connection());
        if let Err(e) = self.board.go_to_week(&store, target) {
            report(&mut self.toasts, &e);
        }
    }

    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("week_navigation").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let week_start = self.board.week_start();
                if ui.button("◀").on_hover_text("Previous week").clicked() {
                    self.navigate(week_start - Duration::days(7));
                }
                if ui.button("Today").clicked() {
                    let store = SqliteStore::new(self.database.connection());
                    if let Err(e) = self.board.current_week(&store, Local::now().date_naive()) {
                        report(&mut self.toasts, &e);
                    }
                }
                if ui.button("▶").on_hover_text("Next week").clicked() {
                    self.navigate(week_start + Duration::days(7));
                }

                let week_end = week_start + Duration::days(6);
                ui.heading(format!(
                    "{} – {}",
                    week_start.format("%d %b"),
                    week_end.format("%d %b %Y")
                ));
            });

            ui.add_space(4.0);
            render_category_bar(ui, &self.categories, self.board.selection_mut());
            ui.add_space(4.0);
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let hours = self
            .board
            .persisted()
            .hours_by_category(self.board.settings().slot_minutes);
        let in_flight = self.worker.as_ref().map_or(0, ReconcileWorker::in_flight);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let secondary = if ui.visuals().dark_mode {
                        Color32::from_gray(160)
                    } else {
                        Color32::from_gray(100)
                    };

                    ui.label(
                        RichText::new(format!("{} slots this week", self.board.persisted().len()))
                            .small(),
                    );
                    for (label, total) in &hours {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(format!("{}: {:.1}h", label, total))
                                .small()
                                .color(secondary),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if in_flight > 0 {
                            ui.spinner();
                            ui.label(RichText::new("Saving…").small().color(secondary));
                        } else if self.board.selection().is_empty() {
                            ui.label(
                                RichText::new("Pick a category, then drag over the grid")
                                    .small()
                                    .color(secondary),
                            );
                        }
                    });
                });
            });
    }

    fn render_grid(&mut self, ctx: &egui::Context) {
        let model = self.board.grid();
        let dragging = self.board.gesture().is_some();

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .auto_shrink([false, false])
                    .drag_to_scroll(false)
                    .show(ui, |ui| {
                        render_availability_grid(ui, &model, &self.categories, dragging)
                    })
                    .inner
            })
            .inner;

        for event in events {
            match event {
                GridPointerEvent::Down { date, time } => self.board.pointer_down(date, time),
                GridPointerEvent::Enter { date, time } => self.board.pointer_enter(date, time),
                GridPointerEvent::Up => self.finish_drag(),
                GridPointerEvent::Cancel => self.board.cancel_gesture(),
            }
        }
    }
}

fn report(toasts: &mut ToastManager, err: &AvailabilityError) {
    match err {
        AvailabilityError::NotAuthenticated | AvailabilityError::NoCategorySelected => {
            toasts.warning(err.user_message())
        }
        _ => toasts.error(err.user_message()),
    }
}

fn load_settings_or_default(database: &Database) -> GridSettings {
    match SettingsService::new(database).get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load grid settings: {}, using defaults", e);
            GridSettings::default()
        }
    }
}

fn load_categories(database: &Database) -> Vec<Category> {
    match CategoryService::new(database.connection()).list_all() {
        Ok(categories) => categories,
        Err(e) => {
            log::warn!("Failed to load categories: {}", e);
            Vec::new()
        }
    }
}

/// Background saver for file databases. An in-memory database is private to
/// its connection, so saves stay on the UI thread.
fn start_worker(database: &Database) -> Option<ReconcileWorker> {
    if database.path() == IN_MEMORY {
        return None;
    }
    match ReconcileWorker::new(database.path()) {
        Ok(worker) => Some(worker),
        Err(e) => {
            log::warn!("Saving on the UI thread: {:#}", e);
            None
        }
    }
}
