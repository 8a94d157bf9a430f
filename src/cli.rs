use clap::{value_parser, crate_version, Arg, ArgAction, Command, ValueHint};

const LINE_HELP: &str = "The machine's output must be going to the serial port, e.g.,
type `*FX3,5` and `*FX2,1` at the machine before running bbcdump.
The line settings must agree with the machine's `*FX7` and `*FX8` settings.";
const TIMEOUT_LONG_HELP: &str = "A reply is complete when the line has been idle this long.
Raise it if the machine pauses for long seeks in the middle of a dump.";

fn file_arg(help: &'static str) -> Arg {
    Arg::new("file").short('f').long("file").value_name("NAME").required(true).help(help)
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

/// Arguments shared by every subcommand that talks to the machine
fn with_line_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("port").long("port").short('p').help("serial device")
            .value_name("PATH")
            .value_hint(ValueHint::FilePath)
            .default_value("/dev/ttyUSB0"))
        .arg(Arg::new("baud").long("baud").short('b').help("baud rate")
            .value_name("RATE")
            .value_parser(["75","150","300","1200","2400","4800","9600","19200"])
            .default_value("9600"))
        .arg(Arg::new("data-bits").long("data-bits").help("bits per character")
            .value_name("BITS")
            .value_parser(value_parser!(u8).range(5..=8))
            .default_value("7"))
        .arg(Arg::new("parity").long("parity").help("parity mode")
            .value_name("MODE")
            .value_parser(["none","odd","even"])
            .default_value("even"))
        .arg(Arg::new("stop-bits").long("stop-bits").help("stop bits")
            .value_name("BITS")
            .value_parser(value_parser!(u8).range(1..=2))
            .default_value("1"))
        .arg(Arg::new("timeout").long("timeout").help("idle time in seconds that ends a reply")
            .long_help(TIMEOUT_LONG_HELP)
            .value_name("SECONDS")
            .value_parser(value_parser!(f64))
            .default_value("3.0"))
        .arg(Arg::new("drive").long("drive").short('d').help("drive number")
            .value_name("DRIVE")
            .value_parser(value_parser!(u8).range(0..=3))
            .default_value("0"))
        .arg(Arg::new("check-ascii").long("check-ascii").help("cross check dump bytes against the ascii column")
            .action(ArgAction::SetTrue))
        .after_help(LINE_HELP)
}

pub fn build_cli() -> Command {
    let long_help = "bbcdump is always invoked with exactly one of several subcommands.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list drive 2:          `bbcdump catalog -d 2`
dump a whole disc:     `bbcdump dump -d 0 -o disc-16-0.json`
dump, skipping files:  `bbcdump dump -d 2 -o disc-16-2.json --skip BADFILE1,BADFILE2`
one file to the host:  `bbcdump get -f $.PROG > prog.bin`
archive to files:      `bbcdump unpack -a disc-16-0.json -o disc-16-0`";

    let mut main_cmd = Command::new("bbcdump")
        .about("Retrieve files from a BBC Micro disc over a serial line.")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(with_line_args(
        Command::new("catalog")
            .visible_alias("cat")
            .about("list the files on a disc")
    ));
    main_cmd = main_cmd.subcommand(with_line_args(
        Command::new("get")
            .arg(file_arg("name of the file on the disc, e.g. $.PROG"))
            .about("dump one file, write to stdout")
    ));
    main_cmd = main_cmd.subcommand(with_line_args(
        Command::new("dump")
            .arg(Arg::new("output").long("output").short('o').help("path of the JSON archive to write")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .required(true))
            .arg(Arg::new("skip").long("skip").help("files to leave out")
                .value_name("LIST")
                .value_delimiter(',')
                .required(false)
                .long_help("comma delimited list of disc file names that will not be dumped"))
            .arg(indent_arg())
            .about("dump every file on a disc to a JSON archive")
    ));
    main_cmd = main_cmd.subcommand(
        Command::new("unpack")
            .arg(Arg::new("archive").long("archive").short('a').help("path of the JSON archive to read")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .required(true))
            .arg(Arg::new("output").long("output").short('o').help("directory to write the files into")
                .value_name("DIR")
                .value_hint(ValueHint::DirPath)
                .required(true))
            .about("write each file in an archive to the host file system")
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(Arg::new("shell").long("shell").short('s').help("type of shell")
                .value_name("SHELL")
                .value_parser(["bash","elv","fish","ps1","zsh"])
                .required(true))
            .about("write shell completion script to stdout")
    );
    main_cmd
}
