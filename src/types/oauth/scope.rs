//! OAuth2 scopes, sent space separated in the `scope` field.

use crate::preinstanced;

preinstanced! {
    /// Permission a user grants an application through OAuth2.
    pub enum Oauth2Scope: String {
        /// Read the user's activities.
        ActivitiesRead = "activities.read",
        /// Update the user's activities.
        ActivitiesWrite = "activities.write",
        /// Read build data of the user's applications.
        ApplicationsBuildsRead = "applications.builds.read",
        /// Upload builds of the user's applications.
        ApplicationsBuildsUpload = "applications.builds.upload",
        /// Use commands in a guild.
        ApplicationsCommands = "applications.commands",
        /// Update the application's commands.
        ApplicationsCommandsUpdate = "applications.commands.update",
        /// Update command permissions in the user's guilds.
        ApplicationsCommandsPermissionsUpdate = "applications.commands.permissions.update",
        /// Read the application's entitlements.
        ApplicationsEntitlements = "applications.entitlements",
        /// Update store data of the user's applications.
        ApplicationsStoreUpdate = "applications.store.update",
        /// Add a bot to a guild.
        Bot = "bot",
        /// Read the user's third-party connections.
        Connections = "connections",
        /// See the user's direct messages.
        DmChannelsRead = "dm_channels.read",
        /// Read the user's email address.
        Email = "email",
        /// Join the user to a group direct message.
        GdmJoin = "gdm.join",
        /// List the user's guilds.
        Guilds = "guilds",
        /// Join the user to a guild.
        GuildsJoin = "guilds.join",
        /// Read the user's guild members.
        GuildsMembersRead = "guilds.members.read",
        /// Read the user without their email.
        Identify = "identify",
        /// Read messages from channels the user is in, local RPC only.
        MessagesRead = "messages.read",
        /// Read the user's friends.
        RelationshipsRead = "relationships.read",
        /// Update the user's role connection metadata.
        RoleConnectionsWrite = "role_connections.write",
        /// Control the user's local Discord client.
        Rpc = "rpc",
        /// Update the user's activities over RPC.
        RpcActivitiesWrite = "rpc.activities.write",
        /// Receive notifications over RPC.
        RpcNotificationsRead = "rpc.notifications.read",
        /// Read the user's voice settings over RPC.
        RpcVoiceRead = "rpc.voice.read",
        /// Update the user's voice settings over RPC.
        RpcVoiceWrite = "rpc.voice.write",
        /// Connect to voice on the user's behalf.
        Voice = "voice",
        /// Create a webhook in the channel the user picks.
        WebhookIncoming = "webhook.incoming",
    }
}
