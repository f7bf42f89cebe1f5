use crate::profile::{EasterEgg, Profile};
use crate::{GateError, Result};

const NEW_PROFILE_KEY: &str = "nuevo";
const NEW_PROFILE_NAME: &str = "Nombre Nuevo";
const NEW_PROFILE_MESSAGE: &str = "Escribe tu mensaje aquí...";

/// In-memory editing of a roster.
///
/// Works on its own copy; the gate only sees the changes once
/// [`roster`](Self::roster) is handed back to it.
#[derive(Clone, Debug, Default)]
pub struct RosterEditor {
    profiles: Vec<Profile>,
}

impl RosterEditor {
    pub fn new(roster: &[Profile]) -> Self {
        Self {
            profiles: roster.to_vec(),
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| GateError::UnknownProfile(id.to_owned()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Profile> {
        self.profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GateError::UnknownProfile(id.to_owned()))
    }

    /// Append a profile with placeholder content, returning its id
    pub fn add_profile(&mut self) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut profile =
            Profile::new(&id, &[NEW_PROFILE_KEY], NEW_PROFILE_NAME);
        profile.message = NEW_PROFILE_MESSAGE.to_owned();

        log::info!("profile {} added", id);
        self.profiles.push(profile);
        id
    }

    pub fn remove_profile(&mut self, id: &str) -> Result<Profile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| GateError::UnknownProfile(id.to_owned()))?;
        log::info!("profile {} removed", id);
        Ok(self.profiles.remove(index))
    }

    pub fn update_profile(
        &mut self,
        id: &str,
        update: impl FnOnce(&mut Profile),
    ) -> Result<()> {
        update(self.get_mut(id)?);
        Ok(())
    }

    /// Replace the access keys with a comma separated list
    pub fn set_access_keys_csv(&mut self, id: &str, csv: &str) -> Result<()> {
        let keys = csv
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
            .collect();
        self.get_mut(id)?.access_keys = keys;
        Ok(())
    }

    /// Replace the images with one URL per line
    pub fn set_images_lines(&mut self, id: &str, text: &str) -> Result<()> {
        let images = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        self.get_mut(id)?.images = images;
        Ok(())
    }

    /// Append a blank text egg, returning its index
    pub fn add_egg(&mut self, id: &str) -> Result<usize> {
        let profile = self.get_mut(id)?;
        profile.easter_eggs.push(EasterEgg::text("", ""));
        Ok(profile.easter_eggs.len() - 1)
    }

    pub fn update_egg(
        &mut self,
        id: &str,
        index: usize,
        egg: EasterEgg,
    ) -> Result<()> {
        let slot = self
            .get_mut(id)?
            .easter_eggs
            .get_mut(index)
            .ok_or_else(|| GateError::UnknownEgg(id.to_owned(), index))?;
        *slot = egg;
        Ok(())
    }

    pub fn remove_egg(&mut self, id: &str, index: usize) -> Result<EasterEgg> {
        let profile = self.get_mut(id)?;
        if index >= profile.easter_eggs.len() {
            return Err(GateError::UnknownEgg(id.to_owned(), index));
        }
        Ok(profile.easter_eggs.remove(index))
    }

    /// Fresh roster reflecting every edit so far
    pub fn roster(&self) -> Vec<Profile> {
        self.profiles.clone()
    }
}
