use crate::instances::Instances;

/// Pseudo zone holding region-scoped reservations, i.e. reserved capacity not
/// pinned to any availability zone.
pub const REGION: &str = "region";

/// Splits running capacity into the on-demand remainder and the unused
/// reserved surplus, given the reserved capacity.
///
/// Zone-pinned reservations offset running counts in their own zone. The
/// region-scoped pool then offsets same-size remainders, and whatever is left
/// of it burns down on-demand *footprint* across zones in enumeration order,
/// so a large reservation can partially cover a different size (counts go
/// fractional through the footprint setters).
pub fn split_ondemand(
    running: &Instances,
    reserved: &Instances,
) -> anyhow::Result<(Instances, Instances)> {
    let mut ondemand = Instances::new();
    let mut unused = Instances::new();

    for entry in reserved.entries(Some(REGION)) {
        unused
            .counter(REGION, &entry.family, &entry.size)?
            .borrow_mut()
            .set_count(entry.counter.borrow().count());
    }

    for entry in running.entries(None) {
        let mut count = entry.counter.borrow().count();

        if let Some(reserved_cell) = reserved.peek(&entry.az, &entry.family, &entry.size) {
            let unused_cell = unused.counter(&entry.az, &entry.family, &entry.size)?;
            count -= reserved_cell.borrow().count();
            if count <= 0. {
                unused_cell.borrow_mut().set_count(count.abs());
                count = 0.;
            } else {
                unused_cell.borrow_mut().set_count(0.);
            }
        }

        if let Some(pool) = unused.peek(REGION, &entry.family, &entry.size) {
            count -= pool.borrow().count();
            if count <= 0. {
                pool.borrow_mut().set_count(count.abs());
                count = 0.;
            } else {
                pool.borrow_mut().set_count(0.);
            }
        }

        ondemand
            .counter(&entry.az, &entry.family, &entry.size)?
            .borrow_mut()
            .set_count(count);
    }

    for entry in unused.entries(Some(REGION)) {
        if entry.counter.borrow().footprint() == 0. {
            continue;
        }
        'pool: for az in ondemand.all_azs() {
            for size in ondemand.all_sizes(&az, &entry.family) {
                let Some(target) = ondemand.peek(&az, &entry.family, &size) else {
                    continue;
                };
                let pool_footprint = entry.counter.borrow().footprint();
                let target_footprint = target.borrow().footprint();
                if target_footprint >= pool_footprint {
                    target.borrow_mut().set_footprint(target_footprint - pool_footprint);
                    entry.counter.borrow_mut().set_footprint(0.);
                    break 'pool;
                }
                entry.counter.borrow_mut().set_footprint(pool_footprint - target_footprint);
                target.borrow_mut().set_footprint(0.);
            }
        }
    }

    Ok((ondemand, unused))
}
