use crate::run_impl_enum;
use pcbuild::modules::socket::resolve_cpu_socket;
use serde::Serialize;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct Socket {
    /// CPU name, e.g. "AMD Ryzen 7 5800X"
    name: String,
    #[structopt(long, default_value = "")]
    microarchitecture: String,
}

#[derive(Serialize)]
struct Resolved<'a> {
    name: &'a str,
    microarchitecture: &'a str,
    socket: Option<&'static str>,
}

run_impl_enum!(Socket, self, _ctx, ser, {
    erased_serde::serialize(
        &Resolved {
            name: &self.name,
            microarchitecture: &self.microarchitecture,
            socket: resolve_cpu_socket(&self.name, &self.microarchitecture),
        },
        ser,
    )?;
});
