use clap::Subcommand;

#[derive(Subcommand)]
pub enum SubCommands {
    /// Import key material into the key store.
    Import {
        /// File holding the key (reads stdin when omitted).
        file: Option<String>,
    },

    /// Encrypt data for one or more recipients.
    Encrypt {
        /// Recipient key id, fingerprint or e-mail; repeat for several.
        #[arg(short = 'r', long = "recipient", required = true)]
        recipients: Vec<String>,

        /// Input file (stdin when omitted).
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Output file (stdout when omitted).
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// Decrypt data.
    Decrypt {
        /// File whose first line is the passphrase.
        #[arg(short = 'p', long = "passphrase-file")]
        passphrase_file: Option<String>,

        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// Produce signed data.
    Sign {
        /// File whose first line is the passphrase.
        #[arg(short = 'p', long = "passphrase-file")]
        passphrase_file: Option<String>,

        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// Verify signed data and print the signed content.
    Verify {
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// List every identity usable as a recipient.
    #[command(alias = "ls")]
    Recipients,

    /// Delete keys from the key store.
    DeleteKeys {
        /// Only delete private keys.
        #[arg(long = "private", conflicts_with = "public")]
        private: bool,

        /// Only delete public keys.
        #[arg(long = "public", conflicts_with = "private")]
        public: bool,
    },

    /// Print the version of the PGP tool in use.
    Version,
}
