pub mod counter;
pub mod instances;
pub mod normalize;
pub mod reconcile;
pub mod report;

// three ordering policies coexist in this codebase and are deliberately not
// unified: availability zones enumerate alphabetically, families within a zone
// enumerate in first-seen order, and sizes within a family enumerate in the
// fixed normalization table order. `dump()` (and everything reconciliation
// does) depends on all three, so resist the temptation to sort everything
//
// the flattened "family.size" view and the hierarchical view intentionally
// alias the same counter cells. everything is single threaded by contract,
// hence `Rc<RefCell<_>>` and not anything fancier
