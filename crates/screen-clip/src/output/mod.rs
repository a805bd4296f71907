mod file_saver;
mod preview;
mod prompt;

pub(crate) use {file_saver::FileSaver, preview::SystemPreview, prompt::TerminalPrompt};
