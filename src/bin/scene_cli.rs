#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("scene_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anatomy_engine::Viewer;
    use anatomy_engine::anatomy::layers::DrawSummary;
    use anatomy_engine::anatomy::model::arm_transform;
    use anatomy_engine::anatomy::{LayerKind, ViewerState};
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const USAGE: &str = r"scene_cli (anatomy-engine)

USAGE:
  scene_cli list [options]
  scene_cli panel [options]
  scene_cli obj <path> [options]

OPTIONS:
  --hide <layer>     Hide a layer (skin, muscles, vascular, nerves); repeatable
  --selected         Start with the chemoport selected
  --overwrite        Overwrite an existing OBJ file
  -h, --help         Show this help
";

    #[derive(Debug, Default)]
    struct Options {
        hidden: Vec<LayerKind>,
        selected: bool,
        overwrite: bool,
    }

    impl Options {
        fn state(&self) -> ViewerState {
            let mut state = ViewerState::default();
            for layer in &self.hidden {
                if state.layers.is_visible(*layer) {
                    state = state.with_layer_toggled(*layer);
                }
            }
            if self.selected {
                state = state.with_chemoport_toggled();
            }
            state
        }
    }

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => cmd_list(&parse_options(&mut args)?),
            "panel" => cmd_panel(&parse_options(&mut args)?),
            "obj" => {
                let path = PathBuf::from(args.value("obj <path>")?);
                cmd_obj(&path, &parse_options(&mut args)?)
            }
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn parse_options(args: &mut Args) -> Result<Options, String> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--hide" => {
                    let name = args.value("--hide")?;
                    let layer = name.parse::<LayerKind>().map_err(|e| e.to_string())?;
                    options.hidden.push(layer);
                }
                "--selected" => options.selected = true,
                "--overwrite" => options.overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(format!("unknown option `{other}`")),
            }
        }
        Ok(options)
    }

    fn viewer(options: &Options) -> Result<Viewer, String> {
        Viewer::with_state(options.state()).map_err(|e| format!("build anatomy: {e}"))
    }

    fn cmd_list(options: &Options) -> Result<(), String> {
        let viewer = viewer(options)?;
        for element in viewer.draw_set().elements() {
            let summary = DrawSummary::from(element);
            let triangles = viewer
                .anatomy()
                .mesh(summary.id)
                .map_or(0, |mesh| mesh.mesh.triangle_count());
            println!(
                "{:<16} {:<9} tris={:<5} interactive={} glowing={}",
                summary.id.as_str(),
                summary.group.as_str(),
                triangles,
                summary.interactive,
                summary.glowing
            );
        }
        println!("cursor: {}", viewer.cursor());
        Ok(())
    }

    fn cmd_panel(options: &Options) -> Result<(), String> {
        let viewer = viewer(options)?;
        let panel = viewer.panel();
        println!("{}", panel.title);
        for toggle in &panel.toggles {
            println!(
                "  [{}] {:<16} ({})",
                if toggle.checked { "x" } else { " " },
                toggle.label,
                toggle.track_class
            );
        }
        println!();
        println!("{}", panel.details.heading());
        println!("{}", panel.details.text());
        Ok(())
    }

    fn cmd_obj(path: &Path, options: &Options) -> Result<(), String> {
        let viewer = viewer(options)?;

        if path.exists() && !options.overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);
        writeln!(w, "# anatomy-engine scene_cli").map_err(|e| format!("write obj: {e}"))?;

        let transform = arm_transform();
        let mut offset = 0u32;
        for element in viewer.draw_set().elements() {
            let Some(entry) = viewer.anatomy().mesh(element.id) else {
                continue;
            };
            let mesh = entry.mesh.transformed(&transform);
            mesh.validate()
                .map_err(|e| format!("mesh validation failed for {}: {e}", element.id))?;

            writeln!(w, "o {}", element.id).map_err(|e| format!("write obj: {e}"))?;
            for p in &mesh.positions {
                writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
            }
            for tri in mesh.indices.chunks_exact(3) {
                let a = tri[0] + offset + 1;
                let b = tri[1] + offset + 1;
                let c = tri[2] + offset + 1;
                writeln!(w, "f {a} {b} {c}").map_err(|e| format!("write obj: {e}"))?;
            }

            let count = u32::try_from(mesh.positions.len())
                .map_err(|_| format!("{} has too many vertices", element.id))?;
            offset += count;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))?;
        println!("wrote {}", path.display());
        Ok(())
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
