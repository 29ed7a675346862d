use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    rocstrap completions bash > ~/.bash_completion.d/rocstrap\n\n\
                  Generate zsh completions:\n    rocstrap completions zsh > ~/.zfunc/_rocstrap\n\n\
                  Generate fish completions:\n    rocstrap completions fish > ~/.config/fish/completions/rocstrap.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
