use std::fmt::Write;

use comfy_table::{Table, presets::UTF8_FULL};
use shuttle_optimizer::report::report::Report;

pub fn render_text(report: &Report) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Status: {}", report.status)?;
    if report.diagnostic {
        writeln!(out, "Diagnostic report, no optimal plan was found.")?;
    }
    if let Some(objective) = report.objective {
        writeln!(out, "Total fuel: {objective:.3}")?;
    }
    writeln!(
        out,
        "Solve time: {:#}, subtours: {}, cut rounds: {}",
        report.solve_duration, report.subtours, report.cut_rounds
    )?;

    let mut faculties = Table::new();
    faculties
        .load_preset(UTF8_FULL)
        .set_header(vec!["Faculty", "Demand", "Allocated", ""]);
    for faculty in &report.faculties {
        faculties.add_row(vec![
            faculty.faculty.clone(),
            faculty.demand.to_string(),
            faculty.allocated.to_string(),
            match faculty.matches_demand {
                Some(true) => "",
                Some(false) => "mismatch",
                None => "n/a",
            }
            .to_owned(),
        ]);
    }
    writeln!(out, "\n{faculties}")?;

    let mut vehicles = Table::new();
    vehicles.load_preset(UTF8_FULL).set_header(vec![
        "Vehicle", "Load", "Capacity", "Use %", "Route", "Served", "Fuel",
    ]);
    for vehicle in &report.vehicles {
        let served = vehicle
            .served
            .iter()
            .map(|served| format!("{} ({})", served.faculty, served.students))
            .collect::<Vec<_>>()
            .join(", ");

        vehicles.add_row(vec![
            vehicle.vehicle.clone(),
            vehicle.load.to_string(),
            vehicle.capacity.to_string(),
            format!("{:.1}", vehicle.utilization),
            if vehicle.used {
                vehicle.route.join(" -> ")
            } else {
                String::from("unused")
            },
            served,
            format!("{:.3}", vehicle.total_cost),
        ]);
    }
    writeln!(out, "\n{vehicles}")?;

    let mut arcs = Table::new();
    arcs.load_preset(UTF8_FULL)
        .set_header(vec!["Vehicle", "From", "To", "Fuel"]);
    for vehicle in &report.vehicles {
        for arc in &vehicle.arcs {
            arcs.add_row(vec![
                vehicle.vehicle.clone(),
                arc.from.clone(),
                arc.to.clone(),
                format!("{:.3}", arc.cost),
            ]);
        }
    }
    if report.vehicles.iter().any(|vehicle| !vehicle.arcs.is_empty()) {
        writeln!(out, "\n{arcs}")?;
    }

    if let Some(validation) = &report.validation {
        writeln!(
            out,
            "\nRoute costs sum to {:.6}, objective {:.6}, difference {:.2e} ({})",
            validation.reconstructed_total,
            validation.objective,
            validation.difference,
            if validation.within_tolerance {
                "ok"
            } else {
                "outside tolerance"
            }
        )?;
    }

    Ok(out)
}
