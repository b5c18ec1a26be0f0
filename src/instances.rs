use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use serde::Serialize;

use crate::{counter::InstanceCounter, normalize::NormalizationFactor};

/// Live counter cell shared between the hierarchical az/family/size view and
/// the flattened instance type view. Mutations through either view are
/// visible through the other.
pub type CounterCell = Rc<RefCell<InstanceCounter>>;

#[derive(Debug, Default)]
struct AzState {
    // first-seen order, enumerated as inserted
    families: Vec<FamilyState>,
    // "family.size" aliases into `families`
    instance_types: HashMap<String, CounterCell>,
}

#[derive(Debug)]
struct FamilyState {
    name: String,
    // unordered; enumeration goes through the normalization table order
    sizes: HashMap<String, CounterCell>,
}

#[derive(Debug, Default)]
pub struct Instances {
    azs: BTreeMap<String, AzState>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub az: String,
    pub family: String,
    pub size: String,
    pub counter: CounterCell,
}

/// The record shape consumed by downstream reporting. Field names are a
/// contract, guarded by a test below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub az: String,
    pub itype: String,
    pub family: String,
    pub size: String,
    pub count: f64,
    pub footprint: f64,
}

impl Instances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_az(&self, az: &str) -> bool {
        self.azs.contains_key(az)
    }

    pub fn add_az(&mut self, az: &str) {
        self.azs.entry(az.into()).or_default();
    }

    pub fn all_azs(&self) -> Vec<String> {
        self.azs.keys().cloned().collect()
    }

    pub fn has_family(&self, az: &str, family: &str) -> bool {
        self.azs
            .get(az)
            .is_some_and(|state| state.families.iter().any(|f| f.name == family))
    }

    pub fn add_family(&mut self, az: &str, family: &str) {
        let state = self.azs.entry(az.into()).or_default();
        if !state.families.iter().any(|f| f.name == family) {
            state.families.push(FamilyState {
                name: family.into(),
                sizes: Default::default(),
            })
        }
    }

    pub fn all_families(&self, az: &str) -> Vec<String> {
        let Some(state) = self.azs.get(az) else {
            return Default::default();
        };
        state.families.iter().map(|f| f.name.clone()).collect()
    }

    pub fn has(&self, az: &str, family: &str, size: &str) -> bool {
        self.family_state(az, family)
            .is_some_and(|f| f.sizes.contains_key(size))
    }

    /// Present sizes in normalization table order, regardless of the order
    /// they were inserted.
    pub fn all_sizes(&self, az: &str, family: &str) -> Vec<String> {
        let Some(family_state) = self.family_state(az, family) else {
            return Default::default();
        };
        NormalizationFactor::sorted_all_sizes()
            .filter(|size| family_state.sizes.contains_key(*size))
            .map(Into::into)
            .collect()
    }

    /// Returns the live counter cell, lazily creating it (count 0, weight
    /// from the normalization table) and registering it under both views.
    /// Fails with `UnknownSize` before anything is created.
    pub fn counter(&mut self, az: &str, family: &str, size: &str) -> anyhow::Result<CounterCell> {
        let weight = NormalizationFactor::value(size)?;
        let state = self.azs.entry(az.into()).or_default();
        let index = match state.families.iter().position(|f| f.name == family) {
            Some(index) => index,
            None => {
                state.families.push(FamilyState {
                    name: family.into(),
                    sizes: Default::default(),
                });
                state.families.len() - 1
            }
        };
        if let Some(cell) = state.families[index].sizes.get(size) {
            return Ok(cell.clone());
        }
        let cell = Rc::new(RefCell::new(InstanceCounter::new(weight)));
        state.families[index].sizes.insert(size.into(), cell.clone());
        state
            .instance_types
            .insert(format!("{family}.{size}"), cell.clone());
        Ok(cell)
    }

    /// Non-creating lookup.
    pub fn peek(&self, az: &str, family: &str, size: &str) -> Option<CounterCell> {
        Some(self.family_state(az, family)?.sizes.get(size)?.clone())
    }

    pub fn has_instance_type(&self, az: &str, itype: &str) -> bool {
        self.azs
            .get(az)
            .is_some_and(|state| state.instance_types.contains_key(itype))
    }

    pub fn instance_count(&self, az: &str, itype: &str) -> f64 {
        self.azs
            .get(az)
            .and_then(|state| state.instance_types.get(itype))
            .map(|cell| cell.borrow().count())
            .unwrap_or(0.)
    }

    pub fn set_instance_count(&mut self, az: &str, itype: &str, count: f64) -> anyhow::Result<f64> {
        Ok(self.instance_type_cell(az, itype)?.borrow_mut().set_count(count))
    }

    pub fn add_instance_count(&mut self, az: &str, itype: &str, delta: f64) -> anyhow::Result<f64> {
        Ok(self.instance_type_cell(az, itype)?.borrow_mut().add_count(delta))
    }

    pub fn incr_instance_count(&mut self, az: &str, itype: &str) -> anyhow::Result<f64> {
        self.add_instance_count(az, itype, 1.)
    }

    pub fn instance_types(&self, az: &str) -> Vec<String> {
        let Some(state) = self.azs.get(az) else {
            return Default::default();
        };
        state.instance_types.keys().cloned().collect()
    }

    /// Ordered walk over one zone or all zones: az alphabetical, family as
    /// inserted, size in normalization table order.
    pub fn entries(&self, az: Option<&str>) -> Vec<Entry> {
        let azs = match az {
            Some(az) => vec![az.to_string()],
            None => self.all_azs(),
        };
        let mut entries = Vec::new();
        for az in azs {
            for family in self.all_families(&az) {
                for size in self.all_sizes(&az, &family) {
                    let Some(counter) = self.peek(&az, &family, &size) else {
                        continue;
                    };
                    entries.push(Entry {
                        az: az.clone(),
                        family: family.clone(),
                        size,
                        counter,
                    })
                }
            }
        }
        entries
    }

    pub fn dump(&self) -> Vec<Record> {
        self.entries(None)
            .into_iter()
            .map(|entry| Record {
                itype: format!("{}.{}", entry.family, entry.size),
                count: entry.counter.borrow().count(),
                footprint: entry.counter.borrow().footprint(),
                az: entry.az,
                family: entry.family,
                size: entry.size,
            })
            .collect()
    }

    fn family_state(&self, az: &str, family: &str) -> Option<&FamilyState> {
        self.azs.get(az)?.families.iter().find(|f| f.name == family)
    }

    fn instance_type_cell(&mut self, az: &str, itype: &str) -> anyhow::Result<CounterCell> {
        if let Some(cell) = self.azs.get(az).and_then(|state| state.instance_types.get(itype)) {
            return Ok(cell.clone());
        }
        let (family, size) = itype
            .split_once('.')
            .ok_or(anyhow::anyhow!("invalid instance type {itype}"))?;
        self.counter(az, family, size)
    }
}
