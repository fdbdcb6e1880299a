//! Errors shared by the whole crate.

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Utf8(::std::str::Utf8Error);
    }

    errors {
        ClientNotFound(program: String) {
            description("HTTP client program not found")
            display("HTTP client program not found: {}", program)
        }

        ClientSpawn(program: String) {
            description("failed to start the HTTP client")
            display("failed to start HTTP client: {}", program)
        }

        NoClientStdout {
            description("HTTP client has no stdout")
            display("HTTP client was spawned without a stdout pipe")
        }

        WorkerFailed(reason: String) {
            description("stream worker failed")
            display("stream worker failed: {}", reason)
        }
    }
}
