//! One push run against one device.
//!
//! A [`Session`] walks the stages of [`PushStage`] in order: log in, detect
//! the device type, choose where objects go, drop names that already exist
//! there, optionally name a group, then push. Any failure leaves the session
//! in [`PushStage::Aborted`]; [`Session::reset`] starts over with a new list.

use addrpush::{
    ensure_unique, naming, remove_existing, AddressEntry, AddressGroup, DeviceType, Location,
    PanosClient, PushStage, Scope,
};
use anyhow::{bail, Context as _, Result};
use tracing::{debug, info};

use crate::output::{self, OutputFormat, Summary};
use crate::prompt::{check_username, input_checked, Prompter};

/// Knobs for a session
#[derive(Debug, Clone)]
pub struct Settings {
    pub max_request_len: usize,
    pub auth_attempts: u32,
    /// Offered as the default at the username prompt
    pub username: Option<String>,
    /// Group name chosen up front; skips the group questions
    pub group: Option<String>,
    /// Format of stdout; tables move to stderr for JSON
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_request_len: addrpush::DEFAULT_MAX_REQUEST_LEN,
            auth_attempts: 3,
            username: None,
            group: None,
            output: OutputFormat::Pretty,
        }
    }
}

/// State of one run: the working list, what has been resolved so far, and
/// the current stage.
pub struct Session {
    settings: Settings,
    stage: PushStage,
    entries: Vec<AddressEntry>,
    skipped: Vec<AddressEntry>,
    device: Option<DeviceType>,
    scope: Option<Scope>,
    group: Option<AddressGroup>,
    requests: usize,
}

impl Session {
    /// Start a session for `entries`, which must have unique names.
    pub fn new(entries: Vec<AddressEntry>, settings: Settings) -> Result<Self> {
        ensure_unique(&entries)?;
        Ok(Self {
            settings,
            stage: PushStage::Idle,
            entries,
            skipped: Vec::new(),
            device: None,
            scope: None,
            group: None,
            requests: 0,
        })
    }

    /// Stage reached so far
    pub const fn stage(&self) -> PushStage {
        self.stage
    }

    /// Entries still to be pushed
    pub fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    /// Device type, once detected
    pub const fn device(&self) -> Option<DeviceType> {
        self.device
    }

    /// Device group or vsys, once chosen
    pub const fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Address group, if one was requested
    pub const fn group(&self) -> Option<&AddressGroup> {
        self.group.as_ref()
    }

    /// Discard all progress and start again with a new list.
    pub fn reset(&mut self, entries: Vec<AddressEntry>) -> Result<()> {
        ensure_unique(&entries)?;
        let settings = self.settings.clone();
        *self = Self::new(entries, settings)?;
        debug!("session reset");
        Ok(())
    }

    fn advance(&mut self, next: PushStage) -> Result<()> {
        self.stage.advance(next)?;
        debug!(stage = %next, "session stage");
        Ok(())
    }

    /// Run every remaining stage.
    pub async fn run<P>(&mut self, client: &PanosClient, prompter: &mut P) -> Result<Summary>
    where
        P: Prompter + ?Sized,
    {
        let result = self.drive(client, prompter).await;
        if result.is_err() && !self.stage.is_terminal() {
            self.stage = PushStage::Aborted;
            info!("session aborted");
        }
        result
    }

    async fn drive<P>(&mut self, client: &PanosClient, prompter: &mut P) -> Result<Summary>
    where
        P: Prompter + ?Sized,
    {
        let client = self.authenticate(client, prompter).await?;
        self.resolve_device(&client).await?;
        let scope = self.resolve_scope(&client, prompter).await?;

        if self.resolve_duplicates(&client, &scope).await? {
            self.choose_group(prompter)?;
            self.push(&client, &scope, prompter).await?;
        } else {
            output::warn(&format!("Every object already exists in {scope}, nothing to push."));
        }

        self.advance(PushStage::Done)?;
        Ok(Summary {
            scope,
            created: self.entries.clone(),
            skipped: self.skipped.iter().map(|e| e.name.clone()).collect(),
            group: self.group.as_ref().map(|g| g.name.clone()),
            requests: self.requests,
        })
    }

    /// Log in, retrying bad credentials up to the configured number of times.
    ///
    /// A client that already holds a key is used as is.
    pub async fn authenticate<P>(&mut self, client: &PanosClient, prompter: &mut P) -> Result<PanosClient>
    where
        P: Prompter + ?Sized,
    {
        if client.is_authenticated() {
            self.advance(PushStage::Authenticated)?;
            return Ok(client.clone());
        }

        let attempts = self.settings.auth_attempts.max(1);
        for attempt in 1..=attempts {
            let username = input_checked(prompter, "Username", self.settings.username.as_deref(), check_username)?;
            let password = prompter.password("Password")?;

            match client.authenticate(&username, &password).await {
                Ok(authed) => {
                    info!(%username, "logged in");
                    self.advance(PushStage::Authenticated)?;
                    return Ok(authed);
                }
                Err(e) if e.is_auth_error() => {
                    output::warn(&format!("Login failed ({attempt}/{attempts}): {e}"));
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("cannot reach {}", client.base_url()));
                }
            }
        }
        bail!("giving up after {attempts} failed login attempt(s)")
    }

    /// Detect whether the device is Panorama or a firewall.
    pub async fn resolve_device(&mut self, client: &PanosClient) -> Result<DeviceType> {
        let device = client.objects().detect_device_type().await?;
        output::note(&format!("Connected to a {device}."));
        self.device = Some(device);
        self.advance(PushStage::DeviceTypeResolved)?;
        Ok(device)
    }

    /// Choose the device group or vsys new objects go into.
    pub async fn resolve_scope<P>(&mut self, client: &PanosClient, prompter: &mut P) -> Result<Scope>
    where
        P: Prompter + ?Sized,
    {
        let device = self.device.context("device type not resolved")?;
        let scope = match device {
            DeviceType::Panorama => {
                let groups = client.objects().device_groups().await?;
                let index = prompter.select("Device group", &groups)?;
                let name = groups.get(index).cloned().context("no such device group")?;
                let ancestors = client.op().device_group_ancestors(&name).await?;
                Scope::DeviceGroup { name, ancestors }
            }
            DeviceType::Firewall => Scope::Vsys {
                name: self.choose_vsys(client, prompter).await?,
            },
        };

        info!(%scope, "scope chosen");
        self.scope = Some(scope.clone());
        self.advance(PushStage::ScopeResolved)?;
        Ok(scope)
    }

    async fn choose_vsys<P>(&self, client: &PanosClient, prompter: &mut P) -> Result<String>
    where
        P: Prompter + ?Sized,
    {
        if !client.op().multi_vsys().await? {
            return Ok(Scope::DEFAULT_VSYS.to_string());
        }
        let mut vsys = client.objects().vsys_names().await?;
        if vsys.len() > 1 {
            let index = prompter.select("Vsys", &vsys)?;
            return vsys.get(index).cloned().context("no such vsys");
        }
        Ok(vsys.pop().unwrap_or_else(|| Scope::DEFAULT_VSYS.to_string()))
    }

    /// Drop entries whose names already exist where they would be visible.
    ///
    /// Returns false if nothing is left to push.
    pub async fn resolve_duplicates(&mut self, client: &PanosClient, scope: &Scope) -> Result<bool> {
        let existing = client.objects().existing_names(scope).await?;
        let partition = remove_existing(std::mem::take(&mut self.entries), &existing);
        if partition.has_collisions() {
            output::print_collisions(scope, &partition.removed);
        }
        self.entries = partition.kept;
        self.skipped = partition.removed;
        self.advance(PushStage::DuplicatesResolved)?;
        Ok(!self.entries.is_empty())
    }

    /// Ask whether to group the new objects, and under which name.
    pub fn choose_group<P>(&mut self, prompter: &mut P) -> Result<Option<&AddressGroup>>
    where
        P: Prompter + ?Sized,
    {
        let name = match self.settings.group.clone() {
            Some(name) => Some(name),
            None if prompter.confirm("Add the new objects to an address group?", true)? => {
                Some(input_checked(prompter, "Group name", None, |name| {
                    naming::check(name).map_err(|v| format!("invalid group name '{name}': {v}"))
                })?)
            }
            None => None,
        };

        if let Some(name) = name {
            let members = self.entries.iter().map(|e| e.name.clone()).collect();
            self.group = Some(AddressGroup::new(name, members)?);
            self.advance(PushStage::GroupNameChosen)?;
        }
        Ok(self.group.as_ref())
    }

    /// Confirm, then send every batch: addresses first, group last.
    pub async fn push<P>(&mut self, client: &PanosClient, scope: &Scope, prompter: &mut P) -> Result<()>
    where
        P: Prompter + ?Sized,
    {
        let location = Location::target(scope);
        let objects = client.objects();
        let capacity = self.settings.max_request_len;

        let batches = objects.address_batcher(&location, capacity).pack_entries(&self.entries)?;
        let group_batches = match &self.group {
            Some(group) => objects.group_batcher(&location, capacity).pack_members(group)?,
            None => Vec::new(),
        };

        output::print_table(self.settings.output, &output::entries_table(&self.entries));
        if batches.len() > 1 {
            output::warn(&format!(
                "{} objects do not fit in one request and will be sent in {} requests.",
                self.entries.len(),
                batches.len()
            ));
        }
        let question = format!("Push {} address object(s) to {scope}?", self.entries.len());
        if !prompter.confirm(&question, true)? {
            bail!("push cancelled");
        }

        let progress = output::progress((batches.len() + group_batches.len()) as u64);
        let group = self.group.clone();
        let mut requests = 0;
        let sent = async {
            for batch in &batches {
                progress.set_message(format!("{} address object(s)", batch.len()));
                objects.create_addresses(&location, batch).await?;
                progress.inc(1);
                requests += 1;
            }
            if let Some(group) = &group {
                for batch in &group_batches {
                    progress.set_message(format!("group '{}'", group.name));
                    objects.create_group(&location, group, batch).await?;
                    progress.inc(1);
                    requests += 1;
                }
            }
            Ok::<_, addrpush::PanosError>(())
        }
        .await;
        progress.finish_and_clear();
        self.requests += requests;
        sent?;

        info!(requests = self.requests, %scope, "push complete");
        self.advance(PushStage::Pushed)
    }
}
