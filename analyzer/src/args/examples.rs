const EXAMPLES: &str = r#"EXAMPLES:

1) Aggregated throughput of a multi-shard run:

    Aggregate tput-partition-1.txt .. tput-partition-4.txt found in ./logs/run-1 into
    60 second buckets, subtracting moveTo/move2 relocations from latencies.txt:

    $ shard-plot throughput 4 ./logs/run-1

    This writes ./logs/run-1/tput-aggregated.svg and one tput-partition-N.svg per partition.

2) Custom buckets and additional outputs:

    $ shard-plot throughput 4 ./logs/run-1 --bucket-width 5 --format svg --format html --format json

3) Latency distribution:

    $ shard-plot cdf ./logs/run-1/latencies.txt
    $ shard-plot cdf ./replayer/latencies.txt --log-format replayer --trim-low 0 --trim-high 1

4) Single partition diagnostics:

    $ shard-plot partition ./logs/run-1/tput-partition-2.txt
    $ shard-plot block-interval ./logs/run-1/tput-partition-2.txt --slow-threshold 10

5) Logs without heights or relocation records:

    $ shard-plot throughput 2 ./logs/local --relocation none
    $ shard-plot throughput 2 ./logs/moved --relocation same-file
    $ shard-plot single ./logs/local/tput.txt --bucket-width 1

6) Whole-run comparisons and micro benchmarks:

    $ shard-plot comparison 20 1p.txt 2p.txt 4p.txt 8p.txt --baseline-dir ./runs/0
    $ shard-plot micro proofs.txt headers.txt
    $ shard-plot accounts ./logs/transfers.log

7) Other options:

    Analysis defaults can be kept in a TOML file:

    $ shard-plot --config plots.toml throughput 8 ./logs/run-2

    Each subcommand has its own help:

    $ shard-plot throughput --help
"#;

pub fn print_examples() {
    println!("{}", EXAMPLES);
}
