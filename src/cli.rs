use crate::{
    config::{GapKind, Parameters},
    count::count_paths,
    nw::compute_cost,
    report::{score_table, AlignmentReport},
    trace::{backtrack_limited, TraceLimit},
};
use anyhow::{bail, Context};
use bio::io::fasta;
use clap::{value_parser, ArgAction, Args, Parser, Subcommand};
use coopt_types::*;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct Cli {
    /// A JSON parameter file, or a directory containing `score_matrix.csv`,
    /// `gapopen` and `gapextend`.
    #[clap(short, long, global = true, value_parser = value_parser!(PathBuf))]
    pub params: Option<PathBuf>,

    /// Log more. Pass twice for trace output.
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Align two sequences and enumerate all optimal alignments.
    Align(AlignArgs),
    /// Optimal costs between all pairs of sequences in a Fasta file.
    Matrix(MatrixArgs),
    /// Number of lattice paths, an upper bound on the number of alignments.
    Count { n: usize, m: usize },
}

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// The first sequence, or a Fasta file whose first record is used.
    #[clap(long)]
    pub seq1: String,

    /// The second sequence, or a Fasta file whose first record is used.
    #[clap(long)]
    pub seq2: String,

    #[clap(short, long, value_enum, default_value_t)]
    pub gap_model: GapKind,

    /// Write all optimal alignments to this Fasta file instead of printing a report.
    #[clap(short, long, value_parser = value_parser!(PathBuf))]
    pub output: Option<PathBuf>,

    /// Stop after this many distinct alignments.
    #[clap(long)]
    pub limit: Option<usize>,

    /// Print the result as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Fasta file with the sequences to compare.
    #[clap(value_parser = value_parser!(PathBuf))]
    pub input: PathBuf,

    #[clap(short, long, value_enum, default_value_t)]
    pub gap_model: GapKind,

    /// Print the table as JSON.
    #[clap(long)]
    pub json: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn parameters(&self) -> anyhow::Result<Parameters> {
        match &self.params {
            Some(path) => Parameters::load(path)
                .with_context(|| format!("loading parameters from {}", path.display())),
            None => Ok(Parameters::default()),
        }
    }

    pub fn run(&self, out: &mut impl Write) -> anyhow::Result<()> {
        match &self.command {
            Command::Align(args) => self.run_align(args, out),
            Command::Matrix(args) => {
                let scoring = self.parameters()?.scoring(args.gap_model)?;
                let records = read_records(&args.input)?;
                let table = score_table(&records, &scoring);
                if args.json {
                    serde_json::to_writer_pretty(&mut *out, &table)?;
                    writeln!(out)?;
                } else {
                    write!(out, "{table}")?;
                }
                Ok(())
            }
            Command::Count { n, m } => {
                writeln!(out, "{}", count_paths(*n, *m))?;
                Ok(())
            }
        }
    }

    fn run_align(&self, args: &AlignArgs, out: &mut impl Write) -> anyhow::Result<()> {
        let scoring = self.parameters()?.scoring(args.gap_model)?;
        let a = read_sequence(&args.seq1).context("reading --seq1")?;
        let b = read_sequence(&args.seq2).context("reading --seq2")?;
        log::info!("aligning {} x {} with {:?}", a.len(), b.len(), scoring.gap);

        let limit = args.limit.map_or(TraceLimit::All, TraceLimit::AtMost);
        let cost = compute_cost(&a, &b, &scoring);
        let set = backtrack_limited(&cost, &a, &b, limit);

        if let Some(path) = &args.output {
            write_alignments(path, &set)?;
            log::info!("wrote {} alignments to {}", set.len(), path.display());
            return Ok(());
        }
        let report = AlignmentReport::new(&a, &b, scoring, &set);
        if args.json {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{report}")?;
        }
        Ok(())
    }
}

/// A sequence argument is either a Fasta file or the sequence itself.
pub fn read_sequence(arg: &str) -> anyhow::Result<Sequence> {
    let path = Path::new(arg);
    if !path.is_file() {
        return Ok(arg.parse()?);
    }
    let record = fasta::Reader::new(File::open(path)?)
        .records()
        .next()
        .with_context(|| format!("{} contains no records", path.display()))??;
    Sequence::new(record.seq()).with_context(|| format!("record {}", record.id()))
}

/// All `(id, sequence)` records of a Fasta file.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<(String, Sequence)>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records = fasta::Reader::new(file)
        .records()
        .map(|r| {
            let r = r?;
            let seq = Sequence::new(r.seq()).with_context(|| format!("record {}", r.id()))?;
            Ok((r.id().to_string(), seq))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if records.len() < 2 {
        bail!("{} needs at least two records", path.display());
    }
    Ok(records)
}

/// Write each alignment as two Fasta records `alignment_{k}_seq{1,2}`.
pub fn write_alignments(path: &Path, set: &AlignmentSet) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut writer = fasta::Writer::new(File::create(path)?);
    for (k, aln) in set.iter().enumerate() {
        let k = k + 1;
        writer.write(&format!("alignment_{k}_seq1"), Some("First sequence"), aln.top())?;
        writer.write(&format!("alignment_{k}_seq2"), Some("Second sequence"), aln.bottom())?;
    }
    writer.flush()?;
    Ok(())
}
