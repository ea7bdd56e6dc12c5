//! MoldPlan command-line front end

use clap::{Args, Parser, Subcommand, ValueEnum};
use moldplan_core::{
    plan_layout, solve_fillet_center, LayoutPlan, PitchFloor, PlanSummary, PlateConfig,
    ProductSpec,
};

#[derive(Parser)]
#[command(name = "moldplan")]
#[command(about = "Cavity layout planner for injection-mold plates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the cavity grid for one product
    Solve {
        #[command(flatten)]
        footprint: Footprint,

        /// Cut-to-edge offset (forced to 8 with --lid)
        #[arg(long, default_value = "3")]
        convex: f64,

        /// Overall product height
        #[arg(short = 'z', long)]
        height: f64,

        /// Product has an inner/outer fitting lid
        #[arg(long)]
        lid: bool,

        /// Usable plate width
        #[arg(long, default_value = "975")]
        plate_width: f64,

        /// Plate length including margins
        #[arg(long, default_value = "1100")]
        plate_length: f64,

        /// Lower bound policy for pitch increments
        #[arg(long, value_enum, default_value = "unit")]
        pitch_floor: PitchFloorArg,

        /// Upper bound for pitch increments
        #[arg(long)]
        pitch_cap: Option<u32>,

        /// Disable the relaxation fallback
        #[arg(long)]
        no_relax: bool,

        /// Skip the rotated-orientation check
        #[arg(long)]
        no_rotate: bool,

        /// Time limit in milliseconds (0 = unlimited)
        #[arg(long, default_value = "0")]
        time_limit: u64,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the fillet centre only
    Fillet {
        #[command(flatten)]
        footprint: Footprint,

        /// Print the centre as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Footprint {
    /// Short-side length w
    #[arg(short, long)]
    width: f64,

    /// Long-side length d
    #[arg(short, long)]
    depth: f64,

    /// Fillet radius c
    #[arg(short = 'c', long)]
    fillet: f64,

    /// Curvature radius R of the d-spanning edges
    #[arg(short = 'R', long)]
    outer_radius: Option<f64>,

    /// Curvature radius r of the w-spanning edges
    #[arg(short = 'r', long)]
    side_radius: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PitchFloorArg {
    /// At least 1 mm
    Unit,
    /// At least t
    Clearance,
    /// At least t plus the lid margin
    ClearanceWithLid,
}

impl From<PitchFloorArg> for PitchFloor {
    fn from(arg: PitchFloorArg) -> Self {
        match arg {
            PitchFloorArg::Unit => PitchFloor::Unit,
            PitchFloorArg::Clearance => PitchFloor::Clearance,
            PitchFloorArg::ClearanceWithLid => PitchFloor::ClearanceWithLid,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            footprint,
            convex,
            height,
            lid,
            plate_width,
            plate_length,
            pitch_floor,
            pitch_cap,
            no_relax,
            no_rotate,
            time_limit,
            json,
        } => {
            let spec = ProductSpec::new(
                footprint.width,
                footprint.depth,
                footprint.fillet,
                convex,
                height,
            )
            .with_inner_outer_lid(lid)
            .with_radii(footprint.outer_radius, footprint.side_radius);

            let mut config = PlateConfig::new()
                .with_max_plate_width(plate_width)
                .with_max_plate_length(plate_length)
                .with_pitch_floor(pitch_floor.into())
                .with_relaxation(!no_relax)
                .with_rotation_check(!no_rotate)
                .with_time_limit(time_limit);
            if let Some(cap) = pitch_cap {
                config = config.with_pitch_cap(cap);
            }

            let plan = plan_layout(&spec, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan, &config);
            }
        }

        Commands::Fillet { footprint, json } => {
            let center = solve_fillet_center(
                footprint.width,
                footprint.depth,
                footprint.fillet,
                footprint.outer_radius,
                footprint.side_radius,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&center)?);
            } else {
                println!("Profile: {}", center.profile.name());
                println!("Fillet centre: mx = {:.4}, my = {:.4}", center.mx, center.my);
            }
        }
    }

    Ok(())
}

fn print_plan(plan: &LayoutPlan, config: &PlateConfig) {
    let summary = PlanSummary::from(plan);
    let layout = &plan.primary;

    println!("Cavity Layout");
    println!("=============");
    println!(
        "  Derived:      mt = {}, wpz = {}, t = {}, lid margin = {}",
        plan.derived.mt, plan.derived.wpz, plan.derived.t, plan.derived.additional_margin
    );
    println!(
        "  Fillet:       ({:.3}, {:.3}) [{}]",
        plan.fillet_center.mx,
        plan.fillet_center.my,
        plan.fillet_center.profile.name()
    );
    println!(
        "  Reference:    a0 = {}, b0 = {}",
        plan.reference.a0, plan.reference.b0
    );
    println!("  Grid:         {} = {} cavities", summary.grid, summary.cavities);
    println!("  Pitch:        wp = {}, dp = {}", layout.wp, layout.dp);
    println!("  Cavity pitch: wc = {:.1}, dc = {:.1}", layout.wc, layout.dc);
    println!(
        "  Feed:         ds = {:.1} (limit {:.1})",
        layout.ds, config.max_plate_length
    );
    println!("  Clearance:    L = {:.3}", layout.clearance);
    println!(
        "  Width:        {:.1} of {:.1}",
        layout.width_used(),
        config.max_plate_width
    );
    println!("  Relaxation:   {}", summary.relaxation);

    match plan.rotated {
        Some(rotated) if plan.rotated_advisory() => println!(
            "  Rotated:      {} x {} = {} cavities (better orientation available)",
            rotated.a, rotated.b, rotated.score
        ),
        Some(rotated) => println!(
            "  Rotated:      {} x {} = {} cavities",
            rotated.a, rotated.b, rotated.score
        ),
        None if config.check_rotation => println!("  Rotated:      no feasible layout"),
        None => {}
    }
    println!(
        "  Candidates:   {} evaluated, {} feasible, {} ms",
        plan.stats.evaluated, plan.stats.accepted, plan.computation_time_ms
    );
}
