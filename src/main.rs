use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

use glade::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut app = glade::default();

    let config = WorldConfig::default();
    let mut rng = StdRng::from_os_rng();
    let handles = build_world(app.scene_mut(), &mut rng, &config);

    app.attach_animation(CrystalFloat::new(handles.crystals));
    app.attach_animation(CloudDrift::new(handles.clouds));
    app.set_paper_texture("assets/paper.png");

    app.run();
    Ok(())
}
