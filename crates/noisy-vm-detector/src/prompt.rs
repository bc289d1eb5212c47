use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

/// Values the operator supplies for a run
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorInput {
    pub total_llc_kb: f64,
    pub vm1_id: String,
    pub vm2_id: String,
}

/// Fill in whatever was not given on the command line by prompting.
///
/// Prompts are asked in order (total LLC, VM1, VM2) and only for missing
/// values. An unparseable LLC size fails before the VM prompts.
pub fn resolve<R: BufRead, W: Write>(
    total_llc_kb: Option<f64>,
    vm1_id: Option<String>,
    vm2_id: Option<String>,
    input: &mut R,
    output: &mut W,
) -> Result<OperatorInput> {
    let total_llc_kb = match total_llc_kb {
        Some(kb) => kb,
        None => parse_total_llc(&ask(input, output, "Total LLC size (KB): ")?)?,
    };
    let vm1_id = match vm1_id {
        Some(id) => id.trim().to_string(),
        None => ask(input, output, "VM1 UUID: ")?,
    };
    let vm2_id = match vm2_id {
        Some(id) => id.trim().to_string(),
        None => ask(input, output, "VM2 UUID: ")?,
    };

    Ok(OperatorInput {
        total_llc_kb,
        vm1_id,
        vm2_id,
    })
}

pub fn parse_total_llc(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(kb) => Ok(kb),
        Err(_) => bail!("Invalid total LLC size: {:?}", raw.trim()),
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .with_context(|| format!("Failed to read answer to {:?}", prompt.trim()))?;
    if read == 0 {
        bail!("Input ended before answering {:?}", prompt.trim());
    }
    Ok(line.trim().to_string())
}
