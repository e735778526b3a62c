use clap;

pub fn parse_flags<'a>() -> clap::ArgMatches<'a> {
    clap::App::new("arcls")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("Browse the directory tree hidden in a flat archive listing")
        .arg(
            clap::Arg::from_usage("-d --debug 'Enable debug output'")
                .global(true)
        )
        .arg(
            clap::Arg::from_usage("-l, --listing [listing] 'File with one archive entry per line, - for stdin'")
                .global(true),
        )
        .arg(
            clap::Arg::from_usage("-c, --config [config] 'JSON hierarchy configuration (separator, caseSensitive, ...)'")
                .global(true)
        )
        .subcommand(
            clap::SubCommand::with_name("roots")
                .about("List the top level of the archive"),
        )
        .subcommand(
            clap::SubCommand::with_name("ls")
                .about("List the contents of a directory")
                .arg(clap::Arg::from_usage("<DIR> 'Directory path inside the archive'")),
        )
        .subcommand(
            clap::SubCommand::with_name("find")
                .about("Resolve a path inside the archive")
                .arg(clap::Arg::from_usage("<PATH> 'File or directory path inside the archive'")),
        )
        .subcommand(
            clap::SubCommand::with_name("tree")
                .about("Print the whole directory tree")
                .arg(clap::Arg::from_usage("--json 'Print the tree as JSON'")),
        )
        .subcommand(
            clap::SubCommand::with_name("stats")
                .about("Show node pool statistics after expanding every directory"),
        )
        .get_matches()
}
