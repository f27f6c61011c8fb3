//! Regenerates `src/generated/pb.rs` from `../proto/broker.proto`.
//!
//! The generated bindings are checked in so a normal build needs no `protoc`.
//! Set `RPCX_REGENERATE_PROTO=1` to refresh them after editing the proto file.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed=RPCX_REGENERATE_PROTO");

    if std::env::var_os("RPCX_REGENERATE_PROTO").is_none() {
        return Ok(());
    }

    println!("cargo:rerun-if-changed=../proto/broker.proto");
    tonic_build::configure()
        .build_server(false)
        .out_dir("src/generated")
        .compile(&["../proto/broker.proto"], &["../proto"])?;
    Ok(())
}
