use std::env;
use std::error::Error;
use std::path::Path;

use colored::Colorize;

use nightside::input::Config;
use nightside::quadrature::integrate;
use nightside::{ellip, occultation_modulus, pal};

// Line integrand of the occultor-limb primitive, for the cross-check
fn limb_integrand(bo: f64, ro: f64, theta: f64) -> f64 {
    let x = ro * theta.cos();
    let y = bo + ro * theta.sin();
    let z = (1.0f64 - x * x - y * y).abs().sqrt().max(1.0e-12);
    let f = if z > 1.0 - 1.0e-8 {
        0.5
    } else {
        (1.0 - z * z * z) / (3.0 * (1.0 - z * z))
    };
    f * (ro * ro + bo * ro * theta.sin())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .ok_or("No configuration file specified. Usage: nightside input-file")?;
    let path = Path::new(path);

    let mut config = Config::from_file(path)?;
    config.with_context("constants")?;

    let bo: f64 = config.read("geometry:bo")?;
    let ro: f64 = config.read("geometry:ro")?;
    let k2: f64 = config
        .read("geometry:k2")
        .unwrap_or_else(|_| occultation_modulus(bo, ro));

    println!(
        "{} geometry from {}: bo = {}, ro = {}, k2 = {:.9}",
        "Loaded".bold().cyan(),
        path.display().to_string().bold().blue(),
        bo,
        ro,
        k2
    );

    let kappa: Vec<f64> = config.read("angles:kappa")?;
    let integrals = ellip(bo, ro, &kappa, k2)?;

    println!("{} over kappa = {:?}:", "Evaluated".bold().cyan(), kappa);
    println!("\tF  = {:.12e}", integrals.f);
    println!("\tE  = {:.12e}", integrals.e);
    println!("\tRF = {:.12e}", integrals.rf);
    println!("\tRD = {:.12e}", integrals.rd);
    println!("\tRJ = {:.12e}", integrals.rj);

    if k2 >= 1.0 {
        // In this regime F and E match the Legendre integrands with
        // parameter 1/k2 directly, so cross-check them by quadrature
        let m = 1.0 / k2;
        let mut f_ref = 0.0;
        let mut e_ref = 0.0;
        for pair in kappa.chunks_exact(2) {
            let (th1, th2) = (0.5 * pair[0], 0.5 * pair[1]);
            f_ref += integrate(|t| 1.0 / (1.0 - m * t.sin().powi(2)).sqrt(), th1, th2, 1.0e-12);
            e_ref += integrate(|t| (1.0 - m * t.sin().powi(2)).sqrt(), th1, th2, 1.0e-12);
        }
        println!(
            "{} against quadrature: |dF| = {:.3e}, |dE| = {:.3e}",
            "Checked".bold().cyan(),
            (integrals.f - f_ref).abs(),
            (integrals.e - e_ref).abs()
        );
    }

    // Optional boundary arcs, handed over as flat [start, end, ...] pairs
    if let Ok(phi) = config.read::<Vec<f64>, _>("angles:phi") {
        if phi.len() % 2 != 0 {
            return Err("angles:phi must hold an even number of entries.".into());
        }
        for pair in phi.chunks_exact(2) {
            let val = pal(bo, ro, pair[0], pair[1])?;
            // The antiderivative's angle sits a quarter period behind
            // the sine parametrization of the limb
            let reference = integrate(
                |t| limb_integrand(bo, ro, t),
                pair[0] + 0.5 * std::f64::consts::PI,
                pair[1] + 0.5 * std::f64::consts::PI,
                1.0e-12,
            );
            println!(
                "{} boundary integral over [{:.6}, {:.6}]: {:.12e} (quadrature {:.12e})",
                "Computed".bold().cyan(),
                pair[0],
                pair[1],
                val,
                reference
            );
        }
    }

    println!("{}.", "Done".bold().bright_green());

    Ok(())
}
