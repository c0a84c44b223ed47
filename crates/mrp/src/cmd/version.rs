use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("mrp {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: mrp");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", option_env!("MRP_BUILD_TARGET").unwrap_or("unknown"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "ecc: {}",
        mrp_ecc::EccScheme::ALL
            .iter()
            .map(|scheme| scheme.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "rs parity symbols: {}",
        mrp_ecc::RS_PARITY_SYMBOLS
    );

    Ok(SUCCESS)
}
