//! # List Controller
//!
//! Coordinates one list page end to end:
//! 1. Read the query string on mount and seed the view state
//! 2. Build the list view over a snapshot of the record store
//! 3. Apply user changes (search, dropdowns, dates, sort, paging)
//! 4. Mirror every change back into the URL with history *replace*
//! 5. Forward create/update/delete to the store and refresh the source
//!
//! Validation failures are returned to the caller and leave the page
//! untouched. Store failures are turned into error notices; the page keeps
//! showing the last good snapshot.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use pipeline::filters::{DateRange, Selection};
use pipeline::{ListView, Page, SortOrder};
use store::{Dataset, ImportError, Record, parse_products};
use views::{
    ProductsView, ViewDefinition, ViewSchema, ViewState, build_view, date_filter, decode_state,
    encode_state, enum_filter, search_filter, sort_for,
};

use crate::history::History;
use crate::notice::Notice;

pub struct ListController<V: ViewDefinition, H: History> {
    schema: ViewSchema,
    state: ViewState,
    view: ListView<V::Item, V::Sort>,
    history: H,
    notices: Vec<Notice>,
    now: DateTime<Utc>,
}

impl<V: ViewDefinition, H: History> ListController<V, H> {
    /// Mount the page: decode the URL, build the view, normalize the URL.
    #[instrument(skip(dataset, history), fields(view = V::ROUTE))]
    pub fn mount(dataset: &Dataset, history: H, now: DateTime<Utc>) -> Self {
        let schema = V::schema();
        let mut state = decode_state(history.query(), &schema);
        let view = build_view::<V>(V::store(dataset).list(), &state, now);
        state.page = view.page();

        info!(
            "Mounted {} list: {} of {} rows, page {}/{}",
            V::ROUTE,
            view.total_items(),
            view.source().len(),
            view.page(),
            view.total_pages()
        );

        let mut controller = Self {
            schema,
            state,
            view,
            history,
            notices: Vec::new(),
            now,
        };
        controller.sync_url();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn schema(&self) -> &ViewSchema {
        &self.schema
    }

    pub fn view(&self) -> &ListView<V::Item, V::Sort> {
        &self.view
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Current query string, as written to the history entry.
    pub fn query(&self) -> String {
        encode_state(&self.state, &self.schema)
    }

    pub fn current_page(&self) -> Page<V::Item> {
        self.view.current_page()
    }

    /// Apply a committed (debounced) search term.
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        if term == self.state.search {
            return;
        }
        self.state.search = term.to_string();
        self.view.set_filter(search_filter::<V>(term));
        self.after_filter_change();
    }

    /// Change an enum dropdown; `all` clears it.
    pub fn set_enum(&mut self, param: &str, raw: &str) -> Result<()> {
        let selection = self
            .schema
            .enum_param(param)
            .ok_or_else(|| anyhow!("{} has no filter named '{}'", V::ROUTE, param))?
            .accept(raw)
            .ok_or_else(|| anyhow!("Unknown {} value '{}'", param, raw))?;

        let filter = enum_filter::<V>(param, selection.clone())
            .ok_or_else(|| anyhow!("{} has no filter named '{}'", V::ROUTE, param))?;
        self.state.set_selection(param, selection);
        self.view.set_filter(filter);
        self.after_filter_change();
        Ok(())
    }

    pub fn clear_enum(&mut self, param: &str) -> Result<()> {
        self.set_enum(param, Selection::ALL)
    }

    /// Apply a date range. Presets are resolved against `now`, which also
    /// becomes the controller's clock for later rebuilds.
    pub fn set_date(&mut self, range: DateRange, now: DateTime<Utc>) -> Result<()> {
        if !self.schema.has_date {
            bail!("{} has no date filter", V::ROUTE);
        }
        self.now = now;
        self.view.set_filter(date_filter::<V>(&range, now));
        self.state.date = range;
        self.after_filter_change();
        Ok(())
    }

    pub fn set_sort(&mut self, name: &str) -> Result<()> {
        let canonical = self
            .schema
            .canonical_sort(name)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown sort '{}' (expected one of: {})",
                    name,
                    self.schema.sorts.join(", ")
                )
            })?;

        self.view.set_sort(sort_for::<V>(canonical));
        self.state.sort = canonical.to_string();
        self.after_filter_change();
        Ok(())
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        self.view
            .set_page_size(size)
            .context("Failed to change page size")?;
        self.state.limit = self.view.page_size();
        self.state.page = self.view.page();
        self.sync_url();
        Ok(())
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        self.view
            .go_to_page(page)
            .with_context(|| format!("Failed to open page {}", page))?;
        self.state.page = self.view.page();
        self.sync_url();
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<()> {
        self.go_to_page(self.view.page() + 1)
    }

    pub fn prev_page(&mut self) -> Result<()> {
        self.go_to_page(self.view.page().saturating_sub(1))
    }

    /// Reset every filter, the sort and the paging to their defaults.
    pub fn reset(&mut self, dataset: &Dataset) {
        self.state = ViewState::new(&self.schema);
        self.view = build_view::<V>(V::store(dataset).list(), &self.state, self.now);
        self.sync_url();
    }

    /// Reload the source from the store, keeping the page when still valid.
    pub fn refresh(&mut self, dataset: &Dataset) {
        self.view.set_source(V::store(dataset).list());
        self.state.page = self.view.page();
        self.sync_url();
    }

    pub fn create(&mut self, dataset: &mut Dataset, record: V::Item) -> bool {
        let id = record.id().to_string();
        let result = V::store_mut(dataset).insert(record);
        let message = format!("Created {} {}", <V::Item as Record>::ENTITY, id);
        self.finish_mutation(dataset, result, message)
    }

    pub fn update(&mut self, dataset: &mut Dataset, record: V::Item) -> bool {
        let id = record.id().to_string();
        let result = V::store_mut(dataset).update(record);
        let message = format!("Updated {} {}", <V::Item as Record>::ENTITY, id);
        self.finish_mutation(dataset, result, message)
    }

    pub fn delete(&mut self, dataset: &mut Dataset, id: &str) -> bool {
        let result = V::store_mut(dataset).delete(id).map(|_| ());
        let message = format!("Deleted {} {}", <V::Item as Record>::ENTITY, id);
        self.finish_mutation(dataset, result, message)
    }

    /// CSV of every filtered, sorted row (not just the current page).
    pub fn export_csv(&mut self) -> Result<String> {
        let rows = self.view.filtered();
        match store::export_csv(rows) {
            Ok(csv) => {
                info!("Exported {} {} rows", rows.len(), V::ROUTE);
                self.notices
                    .push(Notice::success(format!("Exported {} rows", rows.len())));
                Ok(csv)
            }
            Err(e) => {
                self.notices.push(Notice::error(format!("Export failed: {}", e)));
                Err(e).context("Failed to export CSV")
            }
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand pending notices to the caller, clearing them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn finish_mutation(
        &mut self,
        dataset: &Dataset,
        result: store::Result<()>,
        success: String,
    ) -> bool {
        match result {
            Ok(()) => {
                info!("{}", success);
                self.notices.push(Notice::success(success));
                self.refresh(dataset);
                true
            }
            Err(e) => {
                warn!("Rejected {} mutation: {}", V::ROUTE, e);
                self.notices.push(Notice::error(e.to_string()));
                false
            }
        }
    }

    fn after_filter_change(&mut self) {
        self.state.page = self.view.page();
        info!(
            "{} filters changed: {} rows, {} active filters, sort {}",
            V::ROUTE,
            self.view.total_items(),
            self.view.filters().active_count(),
            self.view.sort().name()
        );
        self.sync_url();
    }

    /// Rewrite the history entry, only when the query actually changed.
    fn sync_url(&mut self) {
        let query = encode_state(&self.state, &self.schema);
        if query != self.history.query() {
            tracing::debug!("Replacing URL query: '{}' -> '{}'", self.history.query(), query);
            self.history.replace(&query);
        }
    }
}

impl<H: History> ListController<ProductsView, H> {
    /// Replace the catalog from a CSV file.
    ///
    /// The file lands in full or not at all. On rejection every problem is
    /// returned as a message and the catalog is unchanged.
    pub fn import_products(
        &mut self,
        dataset: &mut Dataset,
        csv_text: &str,
    ) -> std::result::Result<usize, Vec<String>> {
        let products = match parse_products(csv_text, self.now) {
            Ok(products) => products,
            Err(e) => return Err(self.reject_import(e)),
        };

        let count = products.len();
        if let Err(e) = dataset.replace_products(products) {
            warn!("Catalog replacement failed: {}", e);
            self.notices.push(Notice::error(format!("Import failed: {}", e)));
            return Err(vec![e.to_string()]);
        }

        info!("Imported {} products", count);
        self.notices
            .push(Notice::success(format!("Imported {} products", count)));
        self.refresh(dataset);
        Ok(count)
    }

    fn reject_import(&mut self, error: ImportError) -> Vec<String> {
        let messages = error.messages();
        warn!("Rejected product import: {}", error);
        self.notices
            .push(Notice::error(format!("Import rejected: {}", error)));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use chrono::{Duration, TimeZone};
    use pipeline::filters::DatePreset;
    use views::OrdersView;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn create_test_dataset() -> Dataset {
        Dataset::mock(42, 50, now()).unwrap()
    }

    #[test]
    fn test_mount_normalizes_url() {
        let dataset = create_test_dataset();
        let history = MemoryHistory::from_url("/orders?page=0&status=PENDING&bogus=1");

        let controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, history, now());

        assert_eq!(controller.history().query(), "status=pending");
        assert_eq!(controller.history().replacements(), 1);
    }

    #[test]
    fn test_mount_leaves_clean_url_alone() {
        let dataset = create_test_dataset();
        let history = MemoryHistory::from_url("/orders?status=pending");

        let controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, history, now());

        assert_eq!(controller.history().replacements(), 0);
    }

    #[test]
    fn test_search_resets_page_and_replaces_url() {
        let dataset = create_test_dataset();
        let mut controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, MemoryHistory::new("/orders", "page=3"), now());
        assert_eq!(controller.view().page(), 3);

        controller.set_search("ORD-00001");

        assert_eq!(controller.view().page(), 1);
        assert_eq!(controller.history().query(), "search=ORD-00001");
        assert_eq!(controller.view().total_items(), 10);
    }

    #[test]
    fn test_invalid_enum_value_is_rejected() {
        let dataset = create_test_dataset();
        let mut controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, MemoryHistory::new("/orders", ""), now());

        assert!(controller.set_enum("status", "shipped").is_err());
        assert!(controller.set_enum("colour", "red").is_err());
        assert!(controller.state().filters.is_empty());
    }

    #[test]
    fn test_page_out_of_range_keeps_state() {
        let dataset = create_test_dataset();
        let mut controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, MemoryHistory::new("/orders", ""), now());
        controller.set_page_size(20).unwrap();
        controller.go_to_page(3).unwrap();

        let err = controller.go_to_page(4).unwrap_err();
        assert!(err.to_string().contains("page 4"));
        assert_eq!(controller.view().page(), 3);
        assert_eq!(controller.history().query(), "page=3&limit=20");
    }

    #[test]
    fn test_date_preset_follows_the_clock() {
        let dataset = create_test_dataset();
        let mut controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, MemoryHistory::new("/orders", ""), now());

        controller
            .set_date(DateRange::preset(DatePreset::Week), now())
            .unwrap();
        let week_ago = now() - Duration::days(7);
        let expected = dataset
            .orders
            .list()
            .iter()
            .filter(|o| o.created_at >= week_ago)
            .count();
        assert_eq!(controller.view().total_items(), expected);

        // Every mock order is older than a week by then
        let later = now() + Duration::days(61);
        controller
            .set_date(DateRange::preset(DatePreset::Week), later)
            .unwrap();
        assert_eq!(controller.view().total_items(), 0);
        assert_eq!(controller.history().query(), "date=week");
    }

    #[test]
    fn test_failed_delete_leaves_source_and_reports() {
        let mut dataset = create_test_dataset();
        let mut controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, MemoryHistory::new("/orders", ""), now());

        assert!(!controller.delete(&mut dataset, "ORD-999999"));

        assert_eq!(controller.view().source().len(), 50);
        let notices = controller.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_error());
    }

    #[test]
    fn test_delete_refreshes_source() {
        let mut dataset = create_test_dataset();
        let mut controller: ListController<OrdersView, _> =
            ListController::mount(&dataset, MemoryHistory::new("/orders", ""), now());

        assert!(controller.delete(&mut dataset, "ORD-000001"));

        assert_eq!(controller.view().source().len(), 49);
        assert!(!controller.notices()[0].is_error());
    }
}
